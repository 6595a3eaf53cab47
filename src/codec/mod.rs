//! Lossy block-transform codec modeled on baseline JPEG.
//!
//! Encoding, per channel:
//! 1. Split the image into Y, Cr and Cb planes
//! 2. Tile each plane into 8x8 blocks (edge-replicated)
//! 3. Decimate every 2x2 group inside each block
//! 4. Forward DCT
//! 5. Quantize (table snap or keep-N-maxima)
//! 6. Zig-zag serialize
//! 7. Delta-code each block's DC against the previous block's DC
//! 8. Bias into `u16` and hand the stream to a [`Compressor`]
//!
//! Decoding inverts 8 through 2, then recombines the planes into RGB.
//! Decimation is never undone.
//!
//! The output is a private round-trip format: it only decodes through
//! [`decode`] / [`decode_with`].

pub mod block;
pub mod dct;
pub mod decimation;
pub mod quantize;
pub mod zigzag;

use log::debug;

use crate::color::ycrcb_to_rgb_clamped;
use crate::compress::{Compressor, DeflateCompressor};
use crate::error::{Error, Result};
use crate::image::{Channel, PixelBuffer, Plane};

use block::{assemble_plane, block_count, split_blocks};
use dct::{dct_2d, idct_2d};
use zigzag::{unzigzag, zigzag};

pub use decimation::Decimation;
pub use quantize::{QuantizationStrategy, QuantizationTable, Quantizer};

/// Side length of a block.
pub const BLOCK_SIZE: usize = 8;

/// Samples per block.
pub const BLOCK_LEN: usize = BLOCK_SIZE * BLOCK_SIZE;

/// An 8x8 block of samples or coefficients in row-major order.
pub type Block = [f64; BLOCK_LEN];

/// A block after quantization and zig-zag serialization.
pub type Sequence = [i32; BLOCK_LEN];

/// Offset added to every serialized value so the stream is non-negative.
pub const STREAM_BIAS: i32 = 255 * 64;

/// Decimation and quantization for one group of channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelOptions {
    /// 2x2 decimation rule.
    pub decimation: Decimation,
    /// Coefficient quantization.
    pub quantization: QuantizationStrategy,
}

impl ChannelOptions {
    /// Create channel options.
    pub const fn new(decimation: Decimation, quantization: QuantizationStrategy) -> Self {
        Self {
            decimation,
            quantization,
        }
    }
}

/// Codec configuration: one setting for luma, one shared by Cr and Cb.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CodecOptions {
    /// Settings for the Y plane.
    pub luma: ChannelOptions,
    /// Settings for the Cr and Cb planes.
    pub chroma: ChannelOptions,
}

impl CodecOptions {
    /// No decimation, standard tables scaled by `multiplier` on all planes.
    pub fn standard(multiplier: f64) -> Self {
        let channel = ChannelOptions::new(
            Decimation::None,
            QuantizationStrategy::StandardTable { multiplier },
        );
        Self {
            luma: channel,
            chroma: channel,
        }
    }

    /// Set the luma decimation rule.
    pub fn luma_decimation(mut self, decimation: Decimation) -> Self {
        self.luma.decimation = decimation;
        self
    }

    /// Set the chroma decimation rule.
    pub fn chroma_decimation(mut self, decimation: Decimation) -> Self {
        self.chroma.decimation = decimation;
        self
    }

    /// Set the luma quantization strategy.
    pub fn luma_quantization(mut self, strategy: QuantizationStrategy) -> Self {
        self.luma.quantization = strategy;
        self
    }

    /// Set the chroma quantization strategy.
    pub fn chroma_quantization(mut self, strategy: QuantizationStrategy) -> Self {
        self.chroma.quantization = strategy;
        self
    }

    /// The settings that apply to `channel`.
    pub fn channel(&self, channel: Channel) -> &ChannelOptions {
        if channel.is_luma() {
            &self.luma
        } else {
            &self.chroma
        }
    }
}

/// One channel's compressed coefficient stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedChannel(Vec<u8>);

impl CompressedChannel {
    /// Compressed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Compressed size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the stream is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the channel, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for CompressedChannel {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Everything needed to decode an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    /// Luma stream.
    pub y: CompressedChannel,
    /// Red-difference chroma stream.
    pub cr: CompressedChannel,
    /// Blue-difference chroma stream.
    pub cb: CompressedChannel,
    /// Original width in pixels.
    pub width: u32,
    /// Original height in pixels.
    pub height: u32,
}

impl CompressedImage {
    /// The stream for `channel`.
    pub fn channel(&self, channel: Channel) -> &CompressedChannel {
        match channel {
            Channel::Y => &self.y,
            Channel::Cr => &self.cr,
            Channel::Cb => &self.cb,
        }
    }

    /// Combined size of the three streams.
    pub fn total_len(&self) -> usize {
        Channel::ALL.iter().map(|&c| self.channel(c).len()).sum()
    }
}

/// Encode an image with the default [`DeflateCompressor`].
pub fn encode(image: &PixelBuffer, options: &CodecOptions) -> Result<CompressedImage> {
    encode_with(image, options, &DeflateCompressor::default())
}

/// Encode an image with a caller-supplied compressor.
pub fn encode_with<C: Compressor + ?Sized>(
    image: &PixelBuffer,
    options: &CodecOptions,
    compressor: &C,
) -> Result<CompressedImage> {
    let encode_channel = |channel: Channel| -> Result<CompressedChannel> {
        let plane = image.plane(channel);
        let encoded = encode_plane(&plane, options.channel(channel), channel.is_luma(), compressor)?;
        debug!(
            "encoded {:?} plane {}x{}: {} bytes",
            channel,
            plane.width(),
            plane.height(),
            encoded.len()
        );
        Ok(encoded)
    };
    Ok(CompressedImage {
        y: encode_channel(Channel::Y)?,
        cr: encode_channel(Channel::Cr)?,
        cb: encode_channel(Channel::Cb)?,
        width: image.width(),
        height: image.height(),
    })
}

/// Decode an image encoded with the default [`DeflateCompressor`].
pub fn decode(compressed: &CompressedImage) -> Result<PixelBuffer> {
    decode_with(compressed, &DeflateCompressor::default())
}

/// Decode an image with the compressor it was encoded with.
///
/// Alpha is fixed at 255.
pub fn decode_with<C: Compressor + ?Sized>(
    compressed: &CompressedImage,
    compressor: &C,
) -> Result<PixelBuffer> {
    let (width, height) = (compressed.width, compressed.height);
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    let y = decode_plane(&compressed.y, width, height, compressor)?;
    let cr = decode_plane(&compressed.cr, width, height, compressor)?;
    let cb = decode_plane(&compressed.cb, width, height, compressor)?;

    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for ((&y, &cr), &cb) in y.samples().iter().zip(cr.samples()).zip(cb.samples()) {
        let (r, g, b) = ycrcb_to_rgb_clamped(to_level(y), to_level(cr), to_level(cb));
        data.extend_from_slice(&[r, g, b, 255]);
    }
    PixelBuffer::new(width, height, data)
}

#[inline]
fn to_level(sample: f64) -> i32 {
    sample.round() as i32
}

/// Encode one plane into a compressed channel.
pub fn encode_plane<C: Compressor + ?Sized>(
    plane: &Plane,
    options: &ChannelOptions,
    luma: bool,
    compressor: &C,
) -> Result<CompressedChannel> {
    let quantizer = options.quantization.quantizer(luma)?;
    let blocks = split_blocks(plane);
    let sequences = delta_encode_dc(&code_blocks(&blocks, options.decimation, &quantizer));

    let mut stream = Vec::with_capacity(sequences.len() * BLOCK_LEN);
    for &value in sequences.iter().flatten() {
        stream.push(bias(value)?);
    }
    Ok(CompressedChannel(compressor.compress(&stream)?))
}

/// Decode one compressed channel into a `width x height` plane.
pub fn decode_plane<C: Compressor + ?Sized>(
    channel: &CompressedChannel,
    width: u32,
    height: u32,
    compressor: &C,
) -> Result<Plane> {
    let stream = compressor.decompress(channel.as_bytes())?;
    let expected = block_count(width, height) * BLOCK_LEN;
    if stream.len() != expected {
        return Err(Error::CorruptStream(format!(
            "expected {expected} values for {width}x{height}, got {}",
            stream.len()
        )));
    }
    let sequences: Vec<Sequence> = stream
        .chunks_exact(BLOCK_LEN)
        .map(|chunk| {
            let mut seq = [0i32; BLOCK_LEN];
            for (out, &v) in seq.iter_mut().zip(chunk) {
                *out = v as i32 - STREAM_BIAS;
            }
            seq
        })
        .collect();
    let blocks = reconstruct_blocks(&delta_decode_dc(&sequences));
    assemble_plane(&blocks, width, height)
}

fn bias(value: i32) -> Result<u16> {
    u16::try_from(value + STREAM_BIAS).map_err(|_| {
        Error::CorruptStream(format!("coefficient {value} outside the biased stream range"))
    })
}

/// Decimate, transform, quantize and serialize one block.
pub fn code_block(block: &Block, decimation: Decimation, quantizer: &Quantizer) -> Sequence {
    let quantized = quantizer.apply(&dct_2d(&decimation.apply(block)));
    zigzag(&quantized.map(|c| c.round() as i32))
}

/// Invert [`code_block`] up to the lost decimation and quantization.
pub fn reconstruct_block(sequence: &Sequence) -> Block {
    idct_2d(&unzigzag(sequence).map(f64::from))
}

fn code_blocks(blocks: &[Block], decimation: Decimation, quantizer: &Quantizer) -> Vec<Sequence> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        blocks
            .par_iter()
            .map(|block| code_block(block, decimation, quantizer))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        blocks
            .iter()
            .map(|block| code_block(block, decimation, quantizer))
            .collect()
    }
}

fn reconstruct_blocks(sequences: &[Sequence]) -> Vec<Block> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        sequences.par_iter().map(reconstruct_block).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        sequences.iter().map(reconstruct_block).collect()
    }
}

/// Replace each DC (index 0) with its difference from the previous
/// block's original DC. The first DC is kept as is.
///
/// Differences wrap, so [`delta_decode_dc`] restores any `i32` exactly.
pub fn delta_encode_dc(sequences: &[Sequence]) -> Vec<Sequence> {
    let mut out = sequences.to_vec();
    for i in 1..sequences.len() {
        out[i][0] = sequences[i][0].wrapping_sub(sequences[i - 1][0]);
    }
    out
}

/// Invert [`delta_encode_dc`] with a running sum.
pub fn delta_decode_dc(sequences: &[Sequence]) -> Vec<Sequence> {
    let mut out = sequences.to_vec();
    for i in 1..out.len() {
        out[i][0] = out[i][0].wrapping_add(out[i - 1][0]);
    }
    out
}
