//! Color space conversions and per-pixel reductions.
//!
//! The RGB to YCrCb direction uses 8.8 fixed point with truncating shifts;
//! the inverse uses exact integer division with floor semantics. Both are
//! pure functions over scalars.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::image::PixelBuffer;

/// Luma of an RGB triple: `(77r + 150g + 29b) >> 8`.
#[inline]
pub fn rgb_to_y(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    ((77 * r + 150 * g + 29 * b) >> 8) as u8
}

/// Red-difference chroma: `((128r - 107g - 21b) >> 8) + 128`.
#[inline]
pub fn rgb_to_cr(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    (((128 * r - 107 * g - 21 * b) >> 8) + 128) as u8
}

/// Blue-difference chroma: `((-43r - 85g + 128b) >> 8) + 128`.
#[inline]
pub fn rgb_to_cb(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    (((-43 * r - 85 * g + 128 * b) >> 8) + 128) as u8
}

/// Convert RGB to `(Y, Cr, Cb)`.
#[inline]
pub fn rgb_to_ycrcb(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    (rgb_to_y(r, g, b), rgb_to_cr(r, g, b), rgb_to_cb(r, g, b))
}

/// Convert `(Y, Cr, Cb)` back to RGB.
///
/// The result is not clamped and may leave `[0, 255]`; see
/// [`ycrcb_to_rgb_clamped`].
#[inline]
pub fn ycrcb_to_rgb(y: i32, cr: i32, cb: i32) -> (i32, i32, i32) {
    let cr = cr - 128;
    let cb = cb - 128;
    let r = y + (256 * cr).div_euclid(183);
    let g = y - (5329 * cb + 11103 * cr).div_euclid(15481);
    let b = y + (256 * cb).div_euclid(144);
    (r, g, b)
}

/// [`ycrcb_to_rgb`] with each channel clamped to `[0, 255]`.
#[inline]
pub fn ycrcb_to_rgb_clamped(y: i32, cr: i32, cb: i32) -> (u8, u8, u8) {
    let (r, g, b) = ycrcb_to_rgb(y, cr, cb);
    (clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

#[inline]
pub(crate) fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Greyscale reduction formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreyscaleMode {
    /// Plain average `(r + g + b) / 3`, truncated.
    Uniform,
    /// CCIR 601-1 weights `0.299r + 0.587g + 0.114b`, rounded.
    Ccir601,
}

/// Reduce one pixel to grey, replicating the level into r, g and b.
/// Alpha passes through.
#[inline]
pub fn to_greyscale([r, g, b, a]: [u8; 4], mode: GreyscaleMode) -> [u8; 4] {
    let level = match mode {
        GreyscaleMode::Uniform => ((r as u16 + g as u16 + b as u16) / 3) as u8,
        GreyscaleMode::Ccir601 => {
            let v = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
            v.round().clamp(0.0, 255.0) as u8
        }
    };
    [level, level, level, a]
}

/// Keep the top `bits_kept` bits of `value` and move it to the middle of
/// the discarded step.
///
/// `bits_kept >= 8` returns `value` unchanged; `0` maps everything to 128.
#[inline]
pub fn quantize_bits(value: u8, bits_kept: u8) -> u8 {
    if bits_kept >= 8 {
        return value;
    }
    let step = 1u16 << (8 - bits_kept);
    let kept = value as u16 & !(step - 1);
    (kept + step / 2) as u8
}

/// The space in which bit-depth reduction happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Reduce R, G and B directly.
    Rgb,
    /// Reduce Y, Cr and Cb, then convert back to RGB.
    YCrCb,
}

impl FromStr for ColorSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "ycrcb" => Ok(ColorSpace::YCrCb),
            _ => Err(Error::UnsupportedOption {
                kind: "color space",
                value: s.to_string(),
            }),
        }
    }
}

/// Bits kept per channel, e.g. 3/2/3 across RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitDepths {
    /// Space the three channels live in.
    pub space: ColorSpace,
    /// Bits kept for each of the three channels, in space order.
    pub bits: [u8; 3],
}

impl BitDepths {
    /// Bit depths in RGB space.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            space: ColorSpace::Rgb,
            bits: [r, g, b],
        }
    }

    /// Bit depths in YCrCb space.
    pub const fn ycrcb(y: u8, cr: u8, cb: u8) -> Self {
        Self {
            space: ColorSpace::YCrCb,
            bits: [y, cr, cb],
        }
    }

    /// Reduce one pixel. Alpha passes through.
    pub fn apply(&self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        let [b0, b1, b2] = self.bits;
        match self.space {
            ColorSpace::Rgb => [
                quantize_bits(r, b0),
                quantize_bits(g, b1),
                quantize_bits(b, b2),
                a,
            ],
            ColorSpace::YCrCb => {
                let (y, cr, cb) = rgb_to_ycrcb(r, g, b);
                let (r, g, b) = ycrcb_to_rgb_clamped(
                    quantize_bits(y, b0) as i32,
                    quantize_bits(cr, b1) as i32,
                    quantize_bits(cb, b2) as i32,
                );
                [r, g, b, a]
            }
        }
    }
}

impl FromStr for BitDepths {
    type Err = Error;

    /// Parses `<space><d><d><d>`, e.g. `rgb323` or `ycrcb222`.
    fn from_str(s: &str) -> Result<Self> {
        let unsupported = || Error::UnsupportedOption {
            kind: "bit depths",
            value: s.to_string(),
        };
        let lower = s.to_ascii_lowercase();
        let split = lower
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(unsupported)?;
        let (space, digits) = lower.split_at(split);
        let space = space.parse::<ColorSpace>().map_err(|_| unsupported())?;
        let bits: Vec<u8> = digits
            .chars()
            .map(|c| c.to_digit(10).filter(|d| *d <= 8).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(unsupported)?;
        match bits.as_slice() {
            &[a, b, c] => Ok(Self {
                space,
                bits: [a, b, c],
            }),
            _ => Err(unsupported()),
        }
    }
}

/// A whole-image pixel transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformation {
    /// [`GreyscaleMode::Uniform`] greyscale.
    UniformGreyscale,
    /// [`GreyscaleMode::Ccir601`] greyscale.
    Ccir601Greyscale,
    /// Store Y, Cr, Cb in the R, G, B slots.
    ToYCrCb,
    /// Read Y, Cr, Cb from the R, G, B slots and convert back to RGB.
    FromYCrCb,
    /// Per-channel bit-depth reduction.
    QuantizeBits(BitDepths),
}

impl Transformation {
    /// Apply the transform, producing a new buffer.
    pub fn apply(&self, image: &PixelBuffer) -> PixelBuffer {
        match *self {
            Transformation::UniformGreyscale => {
                image.map_pixels(|px| to_greyscale(px, GreyscaleMode::Uniform))
            }
            Transformation::Ccir601Greyscale => {
                image.map_pixels(|px| to_greyscale(px, GreyscaleMode::Ccir601))
            }
            Transformation::ToYCrCb => image.map_pixels(|[r, g, b, a]| {
                let (y, cr, cb) = rgb_to_ycrcb(r, g, b);
                [y, cr, cb, a]
            }),
            Transformation::FromYCrCb => image.map_pixels(|[y, cr, cb, a]| {
                let (r, g, b) = ycrcb_to_rgb_clamped(y as i32, cr as i32, cb as i32);
                [r, g, b, a]
            }),
            Transformation::QuantizeBits(depths) => image.map_pixels(|px| depths.apply(px)),
        }
    }
}

impl FromStr for Transformation {
    type Err = Error;

    /// Accepts `uniform-greyscale`, `ccir601-greyscale`, `to-ycrcb`,
    /// `from-ycrcb` and `quantize-bits-<depths>` (see [`BitDepths`]).
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.to_ascii_lowercase().replace('_', "-");
        match tag.as_str() {
            "uniform-greyscale" => Ok(Transformation::UniformGreyscale),
            "ccir601-greyscale" => Ok(Transformation::Ccir601Greyscale),
            "to-ycrcb" => Ok(Transformation::ToYCrCb),
            "from-ycrcb" => Ok(Transformation::FromYCrCb),
            _ => match tag.strip_prefix("quantize-bits-") {
                Some(depths) => Ok(Transformation::QuantizeBits(depths.parse()?)),
                None => Err(Error::UnsupportedOption {
                    kind: "transformation",
                    value: s.to_string(),
                }),
            },
        }
    }
}

impl FromStr for GreyscaleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(GreyscaleMode::Uniform),
            "ccir601" | "ccir601-1" => Ok(GreyscaleMode::Ccir601),
            _ => Err(Error::UnsupportedOption {
                kind: "greyscale mode",
                value: s.to_string(),
            }),
        }
    }
}
