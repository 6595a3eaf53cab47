//! Synthetic test image generation.
//!
//! Deterministic RGBA patterns for codec and palette tests. Noise images
//! take an explicit seed so failures reproduce.

#![allow(dead_code)]

use blockpal::PixelBuffer;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A solid opaque color.
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PixelBuffer {
    PixelBuffer::filled(width, height, [rgb[0], rgb[1], rgb[2], 255]).unwrap()
}

/// Red ramps left to right, green top to bottom, blue along the diagonal.
pub fn gradient_rgb(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        let r = ((x * 255) / width.max(1)) as u8;
        let g = ((y * 255) / height.max(1)) as u8;
        let b = (((x + y) * 127) / (width + height).max(1)) as u8;
        [r, g, b, 255]
    })
    .unwrap()
}

/// Alternating cells of two colors.
pub fn checkerboard(width: u32, height: u32, cell_size: u32, a: [u8; 3], b: [u8; 3]) -> PixelBuffer {
    let cell_size = cell_size.max(1);
    PixelBuffer::from_fn(width, height, |x, y| {
        let [r, g, bl] = if ((x / cell_size) + (y / cell_size)) % 2 == 0 {
            a
        } else {
            b
        };
        [r, g, bl, 255]
    })
    .unwrap()
}

/// Uniform RGB noise, opaque.
pub fn noise(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    PixelBuffer::from_fn(width, height, |_, _| [rng.gen(), rng.gen(), rng.gen(), 255]).unwrap()
}

/// A smooth gradient with a little seeded noise on top.
pub fn photo_like(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = gradient_rgb(width, height);
    base.map_pixels(|[r, g, b, a]| {
        let mut jitter = |v: u8| (v as i32 + rng.gen_range(-6..=6)).clamp(0, 255) as u8;
        [jitter(r), jitter(g), jitter(b), a]
    })
}

/// Samples drawn around the given cluster centers, `per_cluster` each.
pub fn clustered_samples<const D: usize>(
    centers: &[[f64; D]],
    per_cluster: usize,
    spread: f64,
    seed: u64,
) -> Vec<[f64; D]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(centers.len() * per_cluster);
    for center in centers {
        for _ in 0..per_cluster {
            samples.push(center.map(|c| c + rng.gen_range(-spread..=spread)));
        }
    }
    samples
}
