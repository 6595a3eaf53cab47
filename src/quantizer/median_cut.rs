//! Median cut: one deterministic partition pass, no refinement.
//!
//! At each level the set is sorted along its widest dimension and split at
//! `len / 2`. Leaves return the median point of their set as is, so every
//! representative is an actual sample.

use super::{Codebook, CodebookEntry};
use crate::error::{Error, Result};

/// Deepest accepted recursion; `2^depth` entries are allocated up front.
pub const MAX_DEPTH: u32 = 24;

/// Partition `samples` into `2^depth` representatives, left half first.
///
/// Each entry's weight is the size of its leaf set. A set with fewer than
/// two points cannot be halved; both branches then reuse it and only the
/// left one carries its weight.
pub fn median_cut<const D: usize>(samples: &[[f64; D]], depth: u32) -> Result<Codebook<D>> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    if depth > MAX_DEPTH {
        return Err(Error::InvalidParameter(format!(
            "median cut depth {depth} exceeds {MAX_DEPTH}"
        )));
    }
    if let Some(index) = samples.iter().position(|s| s.iter().any(|c| c.is_nan())) {
        return Err(Error::InvalidSample { index });
    }

    let mut points = samples.to_vec();
    let mut entries = Vec::with_capacity(1 << depth);
    cut(&mut points, depth, true, samples.len(), &mut entries);
    Ok(Codebook::new(entries))
}

fn cut<const D: usize>(
    points: &mut [[f64; D]],
    depth: u32,
    weighted: bool,
    total: usize,
    out: &mut Vec<CodebookEntry<D>>,
) {
    if let Some(dim) = widest_dimension(points) {
        points.sort_by(|a, b| a[dim].total_cmp(&b[dim]));
    }
    let mid = points.len() / 2;
    if depth == 0 {
        let count = if weighted { points.len() } else { 0 };
        out.push(CodebookEntry::new(points[mid], count, total));
        return;
    }
    if points.len() < 2 {
        cut(points, depth - 1, weighted, total, out);
        cut(points, depth - 1, false, total, out);
        return;
    }
    let (left, right) = points.split_at_mut(mid);
    cut(left, depth - 1, weighted, total, out);
    cut(right, depth - 1, weighted, total, out);
}

/// Dimension with the largest extent; the first one wins ties.
fn widest_dimension<const D: usize>(points: &[[f64; D]]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for dim in 0..D {
        let (min, max) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[dim]), hi.max(p[dim]))
        });
        let extent = max - min;
        match best {
            Some((_, widest)) if extent <= widest => {}
            _ => best = Some((dim, extent)),
        }
    }
    best.map(|(dim, _)| dim)
}
