//! Owned RGBA pixel buffers and single-channel planes.

use crate::color::{rgb_to_cb, rgb_to_cr, rgb_to_y};
use crate::error::{Error, Result};

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An owned `width x height` image of interleaved 8-bit RGBA samples.
///
/// Transforms never mutate a buffer in place; they return a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap interleaved RGBA bytes (row-major).
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        validate_dimensions(width, height)?;
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        Self::from_fn(width, height, |_, _| rgba)
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        validate_dimensions(width, height)?;
        let mut data = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The RGBA value at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// A new buffer with `f` applied to every pixel.
    pub fn map_pixels<F>(&self, mut f: F) -> PixelBuffer
    where
        F: FnMut([u8; 4]) -> [u8; 4],
    {
        let mut data = Vec::with_capacity(self.data.len());
        for px in self.pixels() {
            data.extend_from_slice(&f(px));
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Raw interleaved RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Extract one luma/chroma plane.
    pub fn plane(&self, channel: Channel) -> Plane {
        let convert: fn(u8, u8, u8) -> u8 = match channel {
            Channel::Y => rgb_to_y,
            Channel::Cr => rgb_to_cr,
            Channel::Cb => rgb_to_cb,
        };
        let samples = self
            .pixels()
            .map(|[r, g, b, _]| convert(r, g, b) as f64)
            .collect();
        Plane {
            width: self.width,
            height: self.height,
            samples,
        }
    }
}

/// One of the three planes the block codec works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Luma.
    Y,
    /// Red-difference chroma.
    Cr,
    /// Blue-difference chroma.
    Cb,
}

impl Channel {
    /// Codec order: Y, Cr, Cb.
    pub const ALL: [Channel; 3] = [Channel::Y, Channel::Cr, Channel::Cb];

    /// Whether this is the luma plane.
    #[inline]
    pub const fn is_luma(self) -> bool {
        matches!(self, Channel::Y)
    }
}

/// A single-channel image with the same shape as its source buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    samples: Vec<f64>,
}

impl Plane {
    /// Wrap row-major samples.
    pub fn new(width: u32, height: u32, samples: Vec<f64>) -> Result<Self> {
        validate_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Plane width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Plane height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Sample at `(x, y)` with coordinates clamped into the plane, so
    /// reads past the right or bottom edge replicate the last column/row.
    #[inline]
    pub fn get_clamped(&self, x: u32, y: u32) -> f64 {
        self.get(x.min(self.width - 1), y.min(self.height - 1))
    }

    /// Row-major samples.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidDataLength {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 3, vec![]),
            Err(Error::InvalidDimensions { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_from_fn_row_major() {
        let img = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        assert_eq!(img.pixel(2, 1), [2, 1, 0, 255]);
        assert_eq!(&img.as_bytes()[4..8], &[1, 0, 0, 255]);
        assert_eq!(img.pixels().len(), 6);
    }

    #[test]
    fn test_map_pixels_leaves_source_untouched() {
        let src = PixelBuffer::filled(2, 2, [10, 20, 30, 40]).unwrap();
        let out = src.map_pixels(|[r, g, b, a]| [b, g, r, a]);
        assert_eq!(src.pixel(0, 0), [10, 20, 30, 40]);
        assert_eq!(out.pixel(1, 1), [30, 20, 10, 40]);
    }

    #[test]
    fn test_plane_extraction() {
        let img = PixelBuffer::filled(2, 1, [255, 255, 255, 255]).unwrap();
        let y = img.plane(Channel::Y);
        let cr = img.plane(Channel::Cr);
        assert_eq!(y.samples(), &[255.0, 255.0]);
        assert_eq!(cr.samples(), &[128.0, 128.0]);
    }

    #[test]
    fn test_plane_clamped_reads_replicate_edges() {
        let plane = Plane::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(plane.get_clamped(5, 0), 2.0);
        assert_eq!(plane.get_clamped(0, 9), 3.0);
        assert_eq!(plane.get_clamped(7, 7), 4.0);
    }
}
