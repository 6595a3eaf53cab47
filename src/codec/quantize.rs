//! Quantization tables and the three coefficient quantization strategies.

use std::str::FromStr;

use super::{Block, BLOCK_LEN, BLOCK_SIZE};
use crate::error::{Error, Result};

/// Standard JPEG luminance quantization table.
const STD_LUMINANCE_TABLE: [u8; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, 12, 12, 14, 19, 26, 58, 60, 55, 14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62, 18, 22, 37, 56, 68, 109, 103, 77, 24, 35, 55, 64, 81, 104, 113,
    92, 49, 64, 78, 87, 103, 121, 120, 101, 72, 92, 95, 98, 112, 100, 103, 99,
];

/// Standard JPEG chrominance quantization table.
const STD_CHROMINANCE_TABLE: [u8; 64] = [
    17, 18, 24, 47, 99, 99, 99, 99, 18, 21, 26, 66, 99, 99, 99, 99, 24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
];

/// An 8x8 table of strictly positive divisors in natural (row-major) order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizationTable {
    values: [f64; BLOCK_LEN],
}

impl QuantizationTable {
    /// Wrap a table, rejecting non-finite or non-positive entries.
    pub fn new(values: [f64; BLOCK_LEN]) -> Result<Self> {
        if let Some(pos) = values.iter().position(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(Error::InvalidParameter(format!(
                "quantization divisor at {pos} is {}, must be positive",
                values[pos]
            )));
        }
        Ok(Self { values })
    }

    /// The standard luminance table times `multiplier`.
    pub fn standard_luma(multiplier: f64) -> Result<Self> {
        Self::scaled(&STD_LUMINANCE_TABLE, multiplier)
    }

    /// The standard chrominance table times `multiplier`.
    pub fn standard_chroma(multiplier: f64) -> Result<Self> {
        Self::scaled(&STD_CHROMINANCE_TABLE, multiplier)
    }

    /// The parametric table `q[i][j] = alpha * (1 + gamma * (i + j + 2))`.
    pub fn alpha_gamma(alpha: f64, gamma: f64) -> Result<Self> {
        let mut values = [0.0; BLOCK_LEN];
        for i in 0..BLOCK_SIZE {
            for j in 0..BLOCK_SIZE {
                values[i * BLOCK_SIZE + j] = alpha * (1.0 + gamma * (i + j + 2) as f64);
            }
        }
        Self::new(values)
    }

    fn scaled(base: &[u8; BLOCK_LEN], multiplier: f64) -> Result<Self> {
        let mut values = [0.0; BLOCK_LEN];
        for (v, &q) in values.iter_mut().zip(base) {
            *v = q as f64 * multiplier;
        }
        Self::new(values)
    }

    /// Divisors in row-major order.
    #[inline]
    pub fn values(&self) -> &[f64; BLOCK_LEN] {
        &self.values
    }
}

/// How DCT coefficients are quantized for one channel group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantizationStrategy {
    /// Standard JPEG table (luma or chroma) scaled by `multiplier`.
    StandardTable {
        /// Scale applied to every table entry.
        multiplier: f64,
    },
    /// Parametric table `alpha * (1 + gamma * (i + j + 2))`.
    AlphaGamma {
        /// Base step.
        alpha: f64,
        /// Growth of the step with frequency.
        gamma: f64,
    },
    /// Keep the `count` largest-magnitude coefficients (DC always first).
    Maxima {
        /// Number of coefficients to keep.
        count: usize,
    },
}

impl Default for QuantizationStrategy {
    fn default() -> Self {
        QuantizationStrategy::StandardTable { multiplier: 1.0 }
    }
}

impl QuantizationStrategy {
    /// Resolve the strategy for a luma (`true`) or chroma channel.
    pub fn quantizer(&self, luma: bool) -> Result<Quantizer> {
        match *self {
            QuantizationStrategy::StandardTable { multiplier } => {
                let table = if luma {
                    QuantizationTable::standard_luma(multiplier)?
                } else {
                    QuantizationTable::standard_chroma(multiplier)?
                };
                Ok(Quantizer::Table(table))
            }
            QuantizationStrategy::AlphaGamma { alpha, gamma } => {
                Ok(Quantizer::Table(QuantizationTable::alpha_gamma(alpha, gamma)?))
            }
            QuantizationStrategy::Maxima { count } => Ok(Quantizer::Maxima(count)),
        }
    }
}

impl FromStr for QuantizationStrategy {
    type Err = Error;

    /// Parses `standard:<multiplier>`, `alpha-gamma:<alpha>,<gamma>` or
    /// `maxima:<count>`.
    fn from_str(s: &str) -> Result<Self> {
        let (tag, params) = s.split_once(':').unwrap_or((s, ""));
        let number = |text: &str| -> Result<f64> {
            text.trim().parse::<f64>().map_err(|_| {
                Error::InvalidParameter(format!("{text:?} in quantization strategy {s:?}"))
            })
        };
        match tag.to_ascii_lowercase().replace('_', "-").as_str() {
            "standard" | "standard-table" => Ok(QuantizationStrategy::StandardTable {
                multiplier: number(params)?,
            }),
            "alpha-gamma" => {
                let (alpha, gamma) = params.split_once(',').ok_or_else(|| {
                    Error::InvalidParameter(format!("alpha-gamma needs two values in {s:?}"))
                })?;
                Ok(QuantizationStrategy::AlphaGamma {
                    alpha: number(alpha)?,
                    gamma: number(gamma)?,
                })
            }
            "maxima" => {
                let count = params.trim().parse::<usize>().map_err(|_| {
                    Error::InvalidParameter(format!("{params:?} in quantization strategy {s:?}"))
                })?;
                Ok(QuantizationStrategy::Maxima { count })
            }
            _ => Err(Error::UnsupportedOption {
                kind: "quantization strategy",
                value: s.to_string(),
            }),
        }
    }
}

/// A strategy resolved for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantizer {
    /// Divide by the table, round, multiply back.
    Table(QuantizationTable),
    /// Keep the N largest magnitudes.
    Maxima(usize),
}

impl Quantizer {
    /// Quantize one block of DCT coefficients.
    pub fn apply(&self, coefficients: &Block) -> Block {
        match self {
            Quantizer::Table(table) => quantize_with_table(coefficients, table),
            Quantizer::Maxima(count) => quantize_by_maxima(coefficients, *count),
        }
    }
}

/// Snap each coefficient to the nearest multiple of its divisor:
/// `round(c / q) * q`.
pub fn quantize_with_table(coefficients: &Block, table: &QuantizationTable) -> Block {
    let mut result = [0.0; BLOCK_LEN];
    for ((out, &c), &q) in result.iter_mut().zip(coefficients).zip(&table.values) {
        *out = (c / q).round() * q;
    }
    result
}

/// Keep at most `count` coefficients, zeroing the rest.
///
/// The cutoff is the `count`-th largest magnitude. Scanning in row-major
/// order, a coefficient is kept when its magnitude reaches the cutoff or it
/// is the DC term, until `count` have been kept.
pub fn quantize_by_maxima(coefficients: &Block, count: usize) -> Block {
    if count == 0 {
        return [0.0; BLOCK_LEN];
    }
    if count >= BLOCK_LEN {
        return *coefficients;
    }
    let mut magnitudes = (*coefficients).map(f64::abs);
    magnitudes.sort_by(f64::total_cmp);
    let cutoff = magnitudes[BLOCK_LEN - count];

    let mut result = [0.0; BLOCK_LEN];
    let mut kept = 0;
    for (i, &c) in coefficients.iter().enumerate() {
        if kept == count {
            break;
        }
        if i == 0 || c.abs() >= cutoff {
            result[i] = c;
            kept += 1;
        }
    }
    result
}
