//! Error types for the blockpal library.

use thiserror::Error;

/// Result type alias for blockpal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the image kernel.
///
/// Every failure is local to the call that produced it; nothing here is
/// retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two buffers that must share a shape do not.
    #[error("dimension mismatch: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        /// Width and height of the first buffer.
        left: (u32, u32),
        /// Width and height of the second buffer.
        right: (u32, u32),
    },
    /// A sample produced a non-finite distance during quantization.
    #[error("sample {index} produced a non-finite distance")]
    InvalidSample {
        /// Index of the offending sample in the input set.
        index: usize,
    },
    /// A configuration tag names no known option.
    #[error("unsupported {kind}: {value:?}")]
    UnsupportedOption {
        /// The option family (e.g. "decimation").
        kind: &'static str,
        /// The rejected tag.
        value: String,
    },
    /// Invalid image dimensions (zero width or height).
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// Pixel data length doesn't match expected size.
    #[error("invalid pixel data length: expected {expected} bytes, got {actual}")]
    InvalidDataLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes provided.
        actual: usize,
    },
    /// A numeric parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A quantizer was handed no samples.
    #[error("cannot quantize an empty sample set")]
    EmptyInput,
    /// The byte compressor failed.
    #[error("compression error: {0}")]
    Compression(String),
    /// A compressed channel cannot be inverted.
    #[error("corrupt channel stream: {0}")]
    CorruptStream(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Compression(err.to_string())
    }
}
