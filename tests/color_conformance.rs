//! Color space conformance tests.
//!
//! Checks the fixed-point RGB <-> YCrCb pair and the whole-image
//! transformations against known values.

use blockpal::color::{
    quantize_bits, rgb_to_cb, rgb_to_cr, rgb_to_y, to_greyscale, ycrcb_to_rgb,
    ycrcb_to_rgb_clamped,
};
use blockpal::{BitDepths, GreyscaleMode, PixelBuffer, Transformation};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
mod support;

use support::synthetic;

#[test]
fn test_round_trip_error_bounds() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut beyond_three = 0;
    for _ in 0..100 {
        let (r, g, b): (u8, u8, u8) = (rng.gen(), rng.gen(), rng.gen());
        let (y, cr, cb) = (rgb_to_y(r, g, b), rgb_to_cr(r, g, b), rgb_to_cb(r, g, b));
        let (r2, g2, b2) = ycrcb_to_rgb_clamped(y as i32, cr as i32, cb as i32);
        let worst = [(r, r2), (g, g2), (b, b2)]
            .iter()
            .map(|&(orig, back)| (orig as i32 - back as i32).abs())
            .max()
            .unwrap_or(0);
        // the fixed-point pair never drifts more than 4 on any channel
        assert!(worst <= 4, "({r}, {g}, {b}) came back as ({r2}, {g2}, {b2})");
        if worst > 3 {
            beyond_three += 1;
        }
    }
    // about 0.5% of all colors drift by exactly 4
    assert!(beyond_three <= 5, "{beyond_three} colors drifted past 3");
}

#[test]
fn test_known_conversions() {
    assert_eq!(rgb_to_y(255, 255, 255), 255);
    assert_eq!(rgb_to_y(0, 0, 0), 0);
    assert_eq!(rgb_to_cr(255, 0, 0), 255);
    assert_eq!(rgb_to_cb(0, 0, 255), 255);
    // neutral chroma
    assert_eq!(ycrcb_to_rgb(90, 128, 128), (90, 90, 90));
}

#[test]
fn test_inverse_is_unclamped() {
    let (r, _, b) = ycrcb_to_rgb(250, 255, 255);
    assert!(r > 255);
    assert!(b > 255);
    assert_eq!(ycrcb_to_rgb_clamped(250, 255, 255).0, 255);
}

#[test]
fn test_greyscale_modes_on_image() {
    let img = synthetic::gradient_rgb(16, 8);
    let uniform = Transformation::UniformGreyscale.apply(&img);
    let ccir = Transformation::Ccir601Greyscale.apply(&img);
    for ((orig, u), c) in img.pixels().zip(uniform.pixels()).zip(ccir.pixels()) {
        assert_eq!(u, to_greyscale(orig, GreyscaleMode::Uniform));
        assert_eq!(c, to_greyscale(orig, GreyscaleMode::Ccir601));
        assert!(u[0] == u[1] && u[1] == u[2]);
        assert!(c[0] == c[1] && c[1] == c[2]);
        assert_eq!(u[3], orig[3]);
    }
}

#[test]
fn test_ycrcb_transform_pair() {
    let img = synthetic::gradient_rgb(12, 12);
    let there = Transformation::ToYCrCb.apply(&img);
    let [r, g, b, a] = img.pixel(5, 7);
    assert_eq!(
        there.pixel(5, 7),
        [rgb_to_y(r, g, b), rgb_to_cr(r, g, b), rgb_to_cb(r, g, b), a]
    );
    let back = Transformation::FromYCrCb.apply(&there);
    for (orig, round) in img.pixels().zip(back.pixels()) {
        for c in 0..3 {
            assert!((orig[c] as i32 - round[c] as i32).abs() <= 4);
        }
    }
}

#[test]
fn test_parse_transformations() {
    assert_eq!(
        "ccir601-greyscale".parse::<Transformation>().unwrap(),
        Transformation::Ccir601Greyscale
    );
    assert_eq!(
        "quantize-bits-rgb323".parse::<Transformation>().unwrap(),
        Transformation::QuantizeBits(BitDepths::rgb(3, 2, 3))
    );
    assert!("sepia".parse::<Transformation>().is_err());
}

#[test]
fn test_quantize_bits_on_image_keeps_alpha() {
    let img = PixelBuffer::filled(3, 3, [200, 100, 50, 77]).unwrap();
    let out = Transformation::QuantizeBits(BitDepths::rgb(2, 2, 2)).apply(&img);
    let expected = [
        quantize_bits(200, 2),
        quantize_bits(100, 2),
        quantize_bits(50, 2),
        77,
    ];
    assert!(out.pixels().all(|p| p == expected));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quantize_bits_levels(value in any::<u8>(), bits in 1u8..=8) {
        let q = quantize_bits(value, bits);
        let mask = if bits == 8 { 0xFF } else { !(0xFFu8 >> bits) };
        // stays in the same code level
        prop_assert_eq!(q & mask, value & mask);
    }

    #[test]
    fn prop_greyscale_uniform_is_mean(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let [v, _, _, a] = to_greyscale([r, g, b, 9], GreyscaleMode::Uniform);
        prop_assert_eq!(v as u32, (r as u32 + g as u32 + b as u32) / 3);
        prop_assert_eq!(a, 9);
    }
}
