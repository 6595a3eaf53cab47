//! Peak signal-to-noise ratio between two images.

use crate::error::{Error, Result};
use crate::image::PixelBuffer;

const PEAK: f64 = 255.0;

/// Sum of squared R, G and B differences over every pixel. Alpha is not
/// compared.
pub fn squared_error_sum(a: &PixelBuffer, b: &PixelBuffer) -> Result<u64> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }
    let sum = a
        .pixels()
        .zip(b.pixels())
        .map(|(p, q)| {
            p[..3]
                .iter()
                .zip(&q[..3])
                .map(|(&x, &y)| {
                    let d = x as i64 - y as i64;
                    (d * d) as u64
                })
                .sum::<u64>()
        })
        .sum();
    Ok(sum)
}

/// Mean squared error over the R, G and B channels.
pub fn mse(a: &PixelBuffer, b: &PixelBuffer) -> Result<f64> {
    let sum = squared_error_sum(a, b)?;
    Ok(sum as f64 / (a.pixel_count() as f64 * 3.0))
}

/// PSNR in decibels: `10 * log10(255^2 / MSE)`.
///
/// Identical images (MSE of zero) give `f64::INFINITY`. Symmetric in its
/// arguments.
pub fn psnr(a: &PixelBuffer, b: &PixelBuffer) -> Result<f64> {
    let mse = mse(a, b)?;
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (PEAK * PEAK / mse).log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psnr_identical_is_infinite() {
        let img = PixelBuffer::from_fn(5, 3, |x, y| [x as u8, y as u8, 7, 255]).unwrap();
        assert_eq!(psnr(&img, &img).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_psnr_black_white_is_zero() {
        let black = PixelBuffer::filled(4, 4, [0, 0, 0, 255]).unwrap();
        let white = PixelBuffer::filled(4, 4, [255, 255, 255, 255]).unwrap();
        assert_eq!(psnr(&black, &white).unwrap(), 0.0);
    }

    #[test]
    fn test_psnr_ignores_alpha() {
        let a = PixelBuffer::filled(2, 2, [9, 9, 9, 0]).unwrap();
        let b = PixelBuffer::filled(2, 2, [9, 9, 9, 255]).unwrap();
        assert_eq!(psnr(&a, &b).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_psnr_dimension_mismatch() {
        let a = PixelBuffer::filled(2, 3, [0; 4]).unwrap();
        let b = PixelBuffer::filled(3, 2, [0; 4]).unwrap();
        assert_eq!(
            psnr(&a, &b).unwrap_err(),
            Error::DimensionMismatch {
                left: (2, 3),
                right: (3, 2)
            }
        );
    }

    #[test]
    fn test_mse_single_channel_offset() {
        let a = PixelBuffer::filled(2, 2, [10, 0, 0, 255]).unwrap();
        let b = PixelBuffer::filled(2, 2, [13, 0, 0, 255]).unwrap();
        // 9 per pixel over 3 channels
        assert!((mse(&a, &b).unwrap() - 3.0).abs() < 1e-12);
        let expected = 10.0 * (65025.0f64 / 3.0).log10();
        assert!((psnr(&a, &b).unwrap() - expected).abs() < 1e-9);
    }
}
