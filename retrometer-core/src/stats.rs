//! Window Statistics
//!
//! ## Overview
//!
//! Order statistics and moments over the calibrator's sample window. These
//! are the hot path of the detection pipeline: they run once per sample over
//! the whole window.
//!
//! ## Percentile Convention
//!
//! Percentiles use linear interpolation between order statistics:
//!
//! ```text
//! sorted = ascending copy of the samples
//! rank   = (count - 1) * q / 100
//! lo     = floor(rank), hi = ceil(rank)
//! p(q)   = sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo)
//! ```
//!
//! This is the default convention of most numeric libraries. Other
//! conventions (nearest rank, midpoint) shift the estimated range by up to
//! one sample spacing and with it every threshold derived from it, so it is
//! pinned here.
//!
//! ## Non-finite Samples
//!
//! Nothing is filtered. A NaN anywhere in the input makes every percentile
//! and the standard deviation NaN. Infinities sort to the ends and only show
//! up in a percentile when they occupy the interpolated ranks, but they
//! always turn the standard deviation into NaN or infinity.
//!
//! ## Cost
//!
//! Sorting dominates at O(n log n) per call. With a 1000 sample window at
//! 20 Hz this is well within budget; callers that grow either should look
//! here first.

use alloc::vec::Vec;

use crate::constants::calibration::{LOWER_PERCENTILE, UPPER_PERCENTILE};

/// Percentile `q` (0..=100) of an ascending slice
///
/// Returns `None` for an empty slice. `q` is clamped to [0, 100].
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let q = q.clamp(0.0, 100.0);
    let rank = (sorted.len() - 1) as f64 * q / 100.0;
    let lo = libm::floor(rank) as usize;
    let hi = libm::ceil(rank) as usize;

    let lower = sorted[lo];
    let upper = sorted[hi.min(sorted.len() - 1)];
    let fraction = rank - lo as f64;

    if lo == hi {
        Some(lower)
    } else {
        Some(lower + (upper - lower) * fraction)
    }
}

/// Percentile `q` of unsorted values
///
/// Allocates a sorted copy. NaN input yields NaN.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.to_vec();
    sort_samples(&mut sorted);
    if sorted.iter().any(|v| v.is_nan()) {
        return Some(f64::NAN);
    }
    percentile_sorted(&sorted, q)
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by n), `None` for an empty slice
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|&x| (x - mean) * (x - mean))
        .sum::<f64>()
        / values.len() as f64;
    Some(libm::sqrt(variance))
}

/// Sort ascending with a total order
///
/// NaNs end up at the ends, which keeps the sort well defined; callers
/// decide what a NaN means for them.
pub fn sort_samples(values: &mut [f64]) {
    values.sort_unstable_by(|a, b| a.total_cmp(b));
}

/// Summary of one window used for the excitation check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// 5th percentile, the robust minimum
    pub p_low: f64,
    /// 95th percentile, the robust maximum
    pub p_high: f64,
    /// Population standard deviation
    pub std: f64,
}

impl WindowStats {
    /// Half the spread between the robust minimum and maximum
    pub fn amplitude(&self) -> f64 {
        libm::fabs(self.p_high - self.p_low) / 2.0
    }

    /// Compute the statistics for `samples`, using `scratch` for sorting
    ///
    /// `scratch` is cleared and refilled; keeping it between calls avoids a
    /// per-sample allocation. Returns `None` for an empty window.
    pub fn compute(samples: &[f64], scratch: &mut Vec<f64>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let std = population_std(samples)?;

        if std.is_nan() && samples.iter().any(|v| v.is_nan()) {
            return Some(Self {
                p_low: f64::NAN,
                p_high: f64::NAN,
                std,
            });
        }

        scratch.clear();
        scratch.extend_from_slice(samples);
        sort_samples(scratch);

        Some(Self {
            p_low: percentile_sorted(scratch, LOWER_PERCENTILE)?,
            p_high: percentile_sorted(scratch, UPPER_PERCENTILE)?,
            std,
        })
    }
}
