//! Generalized Lloyd algorithm (Linde-Buzo-Gray splitting).
//!
//! The codebook starts as the mean of all samples and doubles every round:
//! each centroid `c` becomes `c * (1 - eps)` and `c * (1 + eps)`, then Lloyd
//! refinement runs until the relative drop in average distortion is no
//! longer above `eps`. Rounds continue until the codebook holds at least the
//! requested number of entries, so the result size is always a power of two.
//!
//! Refinement is expressed as [`refine_step`], a function from one
//! [`LloydState`] to the next.

use log::{debug, trace};

use super::median_cut::MAX_DEPTH;
use super::{checked_distance, Codebook, CodebookEntry};
use crate::error::{Error, Result};

/// Tuning for [`generalized_lloyd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Split perturbation and convergence threshold.
    pub epsilon: f64,
    /// Cap on refinement iterations per round. `None` runs to convergence.
    pub max_iterations: Option<usize>,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            epsilon: 0.05,
            max_iterations: None,
        }
    }
}

impl LloydOptions {
    /// Set the perturbation and convergence threshold.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Cap refinement iterations per round.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "lloyd epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(Error::InvalidParameter(
                "lloyd max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cluster state threaded through refinement.
#[derive(Debug, Clone, PartialEq)]
pub struct LloydState<const D: usize> {
    centroids: Vec<[f64; D]>,
    counts: Vec<usize>,
    assignments: Vec<usize>,
    distortion: f64,
}

impl<const D: usize> LloydState<D> {
    /// A single centroid at the mean of `samples`.
    pub fn initial(samples: &[[f64; D]]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptyInput);
        }
        if let Some(index) = samples.iter().position(|s| s.iter().any(|c| c.is_nan())) {
            return Err(Error::InvalidSample { index });
        }
        let mut mean = [0.0; D];
        for s in samples {
            add_into(&mut mean, s);
        }
        let mean = mean.map(|c| c / samples.len() as f64);

        let mut total = 0.0;
        for (i, s) in samples.iter().enumerate() {
            total += checked_distance(s, &mean, i)?;
        }
        Ok(Self {
            centroids: vec![mean],
            counts: vec![samples.len()],
            assignments: vec![0; samples.len()],
            distortion: normalize::<D>(total, samples.len()),
        })
    }

    /// Current centroids.
    #[inline]
    pub fn centroids(&self) -> &[[f64; D]] {
        &self.centroids
    }

    /// Samples assigned to each centroid by the last refinement.
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Centroid index of each sample.
    #[inline]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Mean squared distance per sample and per dimension.
    #[inline]
    pub fn distortion(&self) -> f64 {
        self.distortion
    }

    /// Number of centroids.
    #[inline]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    /// Whether there are no centroids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Double the codebook, replacing each centroid by its `1 - eps` and
    /// `1 + eps` scalings, in that order.
    pub fn split(&self, epsilon: f64) -> Self {
        let mut centroids = Vec::with_capacity(self.centroids.len() * 2);
        for c in &self.centroids {
            centroids.push(c.map(|v| v * (1.0 - epsilon)));
            centroids.push(c.map(|v| v * (1.0 + epsilon)));
        }
        Self {
            counts: vec![0; centroids.len()],
            centroids,
            assignments: self.assignments.clone(),
            distortion: self.distortion,
        }
    }

    /// Convert to a codebook weighted by the last assignment.
    pub fn into_codebook(self) -> Codebook<D> {
        let total = self.assignments.len();
        let entries = self
            .centroids
            .into_iter()
            .zip(self.counts)
            .map(|(v, n)| CodebookEntry::new(v, n, total))
            .collect();
        Codebook::new(entries)
    }
}

/// One Lloyd iteration: assign every sample to its nearest centroid (lowest
/// index on ties), move each centroid to the mean of its samples and
/// recompute the average distortion. Centroids left without samples keep
/// their position.
pub fn refine_step<const D: usize>(
    samples: &[[f64; D]],
    state: &LloydState<D>,
) -> Result<LloydState<D>> {
    let k = state.centroids.len();
    let mut assignments = Vec::with_capacity(samples.len());
    for (i, s) in samples.iter().enumerate() {
        let mut best = 0;
        let mut best_dist = f64::MAX;
        for (j, c) in state.centroids.iter().enumerate() {
            let dist = checked_distance(s, c, i)?;
            if dist < best_dist {
                best_dist = dist;
                best = j;
            }
        }
        assignments.push(best);
    }

    let mut sums = vec![[0.0; D]; k];
    let mut counts = vec![0usize; k];
    for (s, &j) in samples.iter().zip(&assignments) {
        add_into(&mut sums[j], s);
        counts[j] += 1;
    }
    let centroids: Vec<[f64; D]> = state
        .centroids
        .iter()
        .zip(sums.iter().zip(&counts))
        .map(|(old, (sum, &n))| {
            if n == 0 {
                *old
            } else {
                sum.map(|v| v / n as f64)
            }
        })
        .collect();

    let mut total = 0.0;
    for (i, (s, &j)) in samples.iter().zip(&assignments).enumerate() {
        total += checked_distance(s, &centroids[j], i)?;
    }

    Ok(LloydState {
        centroids,
        counts,
        assignments,
        distortion: normalize::<D>(total, samples.len()),
    })
}

/// Repeat [`refine_step`] until the relative improvement
/// `(previous - current) / previous` is no longer above `epsilon`, or the
/// iteration cap is reached. Always runs at least once.
pub fn refine<const D: usize>(
    samples: &[[f64; D]],
    mut state: LloydState<D>,
    options: &LloydOptions,
) -> Result<LloydState<D>> {
    let mut iteration = 0;
    loop {
        let previous = state.distortion;
        state = refine_step(samples, &state)?;
        iteration += 1;
        trace!(
            "lloyd size {} iteration {}: distortion {:.6}",
            state.len(),
            iteration,
            state.distortion
        );
        let improvement = (previous - state.distortion) / previous;
        // NaN when previous is zero: nothing left to improve
        if !(improvement > options.epsilon) {
            break;
        }
        if options.max_iterations.is_some_and(|cap| iteration >= cap) {
            break;
        }
    }
    Ok(state)
}

/// Quantize `samples` into a codebook of the smallest power of two that is
/// at least `size` (one entry for `size <= 1`).
pub fn generalized_lloyd<const D: usize>(
    samples: &[[f64; D]],
    size: usize,
    options: &LloydOptions,
) -> Result<Codebook<D>> {
    Ok(generalized_lloyd_rounds(samples, size, options)?
        .pop()
        .map(LloydState::into_codebook)
        .unwrap_or_else(|| Codebook::new(Vec::new())))
}

/// Like [`generalized_lloyd`], returning the converged state of every
/// round, starting with the single-centroid state.
pub fn generalized_lloyd_rounds<const D: usize>(
    samples: &[[f64; D]],
    size: usize,
    options: &LloydOptions,
) -> Result<Vec<LloydState<D>>> {
    options.validate()?;
    if size > 1usize << MAX_DEPTH {
        return Err(Error::InvalidParameter(format!(
            "codebook size {size} exceeds {}",
            1usize << MAX_DEPTH
        )));
    }
    let mut state = LloydState::initial(samples)?;
    debug!(
        "lloyd: {} samples, target {}, initial distortion {:.6}",
        samples.len(),
        size,
        state.distortion
    );
    let mut rounds = Vec::new();
    while state.len() < size {
        let split = state.split(options.epsilon);
        rounds.push(state);
        state = refine(samples, split, options)?;
        debug!(
            "lloyd round: {} centroids, distortion {:.6}",
            state.len(),
            state.distortion
        );
    }
    rounds.push(state);
    Ok(rounds)
}

#[inline]
fn add_into<const D: usize>(acc: &mut [f64; D], v: &[f64; D]) {
    for (a, b) in acc.iter_mut().zip(v) {
        *a += b;
    }
}

#[inline]
fn normalize<const D: usize>(total: f64, samples: usize) -> f64 {
    total / (samples * D.max(1)) as f64
}
