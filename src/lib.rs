//! # blockpal
//!
//! Image numerics for RGBA pixel buffers: a JPEG-style block-transform
//! codec, two palette vector quantizers and a PSNR quality metric.
//!
//! ## Features
//!
//! - **Block codec**: 8x8 DCT, decimation, three quantization strategies,
//!   zig-zag serialization and DC delta coding over a pluggable byte
//!   compressor
//! - **Palette generation** with Generalized Lloyd (LBG) or Median Cut
//! - **Color space** conversion between RGB and YCrCb, greyscale and
//!   bit-depth reduction
//! - **PSNR** between two same-sized buffers
//! - Optional parallel block transforms via the `parallel` feature
//!
//! ## Example
//!
//! ```rust
//! use blockpal::{codec, quality, CodecOptions, PixelBuffer};
//!
//! let image = PixelBuffer::from_fn(16, 16, |x, y| [(x * 16) as u8, (y * 16) as u8, 96, 255]).unwrap();
//! let compressed = codec::encode(&image, &CodecOptions::default()).unwrap();
//! let restored = codec::decode(&compressed).unwrap();
//! let db = quality::psnr(&image, &restored).unwrap();
//! assert!(db > 20.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod color;
pub mod compress;
pub mod error;
pub mod image;
pub mod palette;
pub mod quality;
pub mod quantizer;

pub use codec::{
    ChannelOptions, CodecOptions, CompressedChannel, CompressedImage, Decimation,
    QuantizationStrategy,
};
pub use color::{BitDepths, ColorSpace, GreyscaleMode, Transformation};
pub use compress::{Compressor, DeflateCompressor};
pub use error::{Error, Result};
pub use image::{Channel, PixelBuffer, Plane};
pub use palette::{PaletteAlgorithm, PaletteOptions};
pub use quantizer::{Codebook, CodebookEntry, LloydOptions};
