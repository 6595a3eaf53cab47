//! Vector quantizers producing weighted codebooks.
//!
//! Both quantizers work on fixed-dimension `[f64; D]` samples; palettes use
//! `D = 4` (RGBA).

pub mod lloyd;
pub mod median_cut;

pub use lloyd::{generalized_lloyd, LloydOptions, LloydState};
pub use median_cut::median_cut;

use crate::color::clamp_u8;
use crate::error::{Error, Result};

/// One representative vector and the share of samples it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodebookEntry<const D: usize> {
    /// The representative.
    pub vector: [f64; D],
    /// Fraction of all samples assigned to this entry.
    pub relative_weight: f64,
    /// Number of samples assigned to this entry.
    pub absolute_weight: usize,
}

impl<const D: usize> CodebookEntry<D> {
    /// Create an entry standing for `count` of `total` samples.
    pub fn new(vector: [f64; D], count: usize, total: usize) -> Self {
        let relative_weight = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        };
        Self {
            vector,
            relative_weight,
            absolute_weight: count,
        }
    }
}

/// An ordered set of representative vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Codebook<const D: usize> {
    entries: Vec<CodebookEntry<D>>,
}

impl<const D: usize> Codebook<D> {
    /// Wrap a list of entries.
    pub fn new(entries: Vec<CodebookEntry<D>>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the codebook has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order.
    #[inline]
    pub fn entries(&self) -> &[CodebookEntry<D>] {
        &self.entries
    }

    /// Representative vectors in order.
    pub fn vectors(&self) -> impl ExactSizeIterator<Item = &[f64; D]> + '_ {
        self.entries.iter().map(|e| &e.vector)
    }

    /// Index of the entry closest to `sample`; the first entry wins ties.
    pub fn nearest(&self, sample: &[f64; D]) -> Option<usize> {
        let mut best = None;
        let mut best_dist = f64::INFINITY;
        for (i, v) in self.vectors().enumerate() {
            let dist = squared_distance(sample, v);
            if dist < best_dist {
                best_dist = dist;
                best = Some(i);
            }
        }
        best
    }

    /// Consume the codebook, returning its entries.
    pub fn into_entries(self) -> Vec<CodebookEntry<D>> {
        self.entries
    }
}

impl Codebook<4> {
    /// Entries rounded and clamped to RGBA bytes.
    pub fn palette(&self) -> Vec<[u8; 4]> {
        self.vectors()
            .map(|v| v.map(|c| clamp_u8(c.round() as i32)))
            .collect()
    }
}

/// Squared Euclidean distance.
#[inline]
pub fn squared_distance<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Squared distance from sample `index`, failing on NaN.
#[inline]
pub(crate) fn checked_distance<const D: usize>(
    sample: &[f64; D],
    centroid: &[f64; D],
    index: usize,
) -> Result<f64> {
    let dist = squared_distance(sample, centroid);
    if dist.is_nan() {
        return Err(Error::InvalidSample { index });
    }
    Ok(dist)
}
