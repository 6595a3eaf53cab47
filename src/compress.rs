//! Reversible byte compression for serialized coefficient streams.
//!
//! The codec only needs an exact inverse; the [`Compressor`] trait keeps
//! the algorithm swappable. [`DeflateCompressor`] is the default and wraps
//! zlib from `flate2`.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

/// A lossless codec over `u16` value streams.
///
/// `decompress(compress(v)) == v` must hold for every input.
pub trait Compressor {
    /// Compress a stream of values.
    fn compress(&self, values: &[u16]) -> Result<Vec<u8>>;

    /// Invert [`Compressor::compress`].
    fn decompress(&self, data: &[u8]) -> Result<Vec<u16>>;
}

/// zlib (DEFLATE) compression of little-endian `u16` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeflateCompressor {
    level: u32,
}

impl DeflateCompressor {
    /// Create a compressor at `level` (0-9, clamped).
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }

    /// Compression level.
    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for DeflateCompressor {
    fn default() -> Self {
        Self::new(9)
    }
}

impl Compressor for DeflateCompressor {
    fn compress(&self, values: &[u16]) -> Result<Vec<u8>> {
        let mut raw = Vec::with_capacity(values.len() * 2);
        for v in values {
            raw.extend_from_slice(&v.to_le_bytes());
        }
        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity(raw.len() / 4),
            Compression::new(self.level),
        );
        encoder.write_all(&raw)?;
        Ok(encoder.finish()?)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u16>> {
        let mut raw = Vec::new();
        ZlibDecoder::new(data).read_to_end(&mut raw)?;
        if raw.len() % 2 != 0 {
            return Err(Error::CorruptStream(format!(
                "odd decompressed length {}",
                raw.len()
            )));
        }
        Ok(raw
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let values: Vec<u16> = (0..5000u32).map(|i| (i * 7919 % 65536) as u16).collect();
        let c = DeflateCompressor::default();
        let packed = c.compress(&values).unwrap();
        assert_eq!(c.decompress(&packed).unwrap(), values);
    }

    #[test]
    fn test_empty_stream() {
        let c = DeflateCompressor::new(1);
        let packed = c.compress(&[]).unwrap();
        assert!(c.decompress(&packed).unwrap().is_empty());
    }

    #[test]
    fn test_repetitive_input_shrinks() {
        let values = vec![16320u16; 4096];
        let packed = DeflateCompressor::default().compress(&values).unwrap();
        assert!(packed.len() < 200, "got {} bytes", packed.len());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = DeflateCompressor::default()
            .decompress(&[0xde, 0xad, 0xbe, 0xef])
            .unwrap_err();
        assert!(matches!(err, Error::Compression(_)));
    }

    #[test]
    fn test_level_clamped() {
        assert_eq!(DeflateCompressor::new(42).level(), 9);
    }
}
