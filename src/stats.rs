//! Descriptive statistics over a filtered numeric column.
//!
//! The battery is fixed: mean, median, mode, sample standard deviation,
//! quartiles, IQR, min, max, count. Degenerate inputs never error -- an empty
//! column yields the all-zero record, a single value yields stddev 0.0.

use serde::{Deserialize, Serialize};

/// Fixed-shape descriptive-statistics record.
///
/// All fields are plain floats (count excepted); formatting and locale belong
/// to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub stddev: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
    pub count: u64,
}

impl Statistics {
    /// Compute the full battery over `values`.
    ///
    /// Callers exclude missing/null values *before* this point; the input is
    /// the clean numeric column. An empty input returns
    /// [`Statistics::default()`] (all zero) rather than erroring.
    ///
    /// Policy notes:
    /// - `mode` is the most frequent value, ties broken toward the smallest.
    ///   When no value repeats the mode is inconclusive and falls back to the
    ///   arithmetic mean.
    /// - `stddev` is the sample standard deviation (divisor n-1); with a
    ///   single value it is reported as 0.0 instead of NaN.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;

        let q1 = percentile(&sorted, 0.25);
        let q2 = percentile(&sorted, 0.50);
        let q3 = percentile(&sorted, 0.75);

        let stddev = if n < 2 {
            0.0
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };

        Self {
            mean,
            median: q2,
            mode: mode_or_mean(&sorted, mean),
            stddev,
            q1,
            q2,
            q3,
            iqr: q3 - q1,
            min: sorted[0],
            max: sorted[n - 1],
            count: n as u64,
        }
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// Sample points sit at the midpoints of equal-mass segments
/// (`h = q*n - 0.5`), so the quartiles of `[10, 20, 30, 40]` are 15 and 35
/// and the median of an odd-length input is its middle element.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    let pos = (q * n as f64 - 0.5).clamp(0.0, (n - 1) as f64);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Most frequent value, or the mean when every value is distinct.
///
/// Scans runs of bit-identical values in the sorted input; a strictly longer
/// run is required to displace the current best, which breaks frequency ties
/// toward the smallest value.
fn mode_or_mean(sorted: &[f64], mean: f64) -> f64 {
    let mut best_value = sorted[0];
    let mut best_len = 1usize;
    let mut run_value = sorted[0];
    let mut run_len = 1usize;

    for &v in &sorted[1..] {
        if v.to_bits() == run_value.to_bits() {
            run_len += 1;
        } else {
            if run_len > best_len {
                best_value = run_value;
                best_len = run_len;
            }
            run_value = v;
            run_len = 1;
        }
    }
    if run_len > best_len {
        best_value = run_value;
        best_len = run_len;
    }

    if best_len > 1 {
        best_value
    } else {
        mean
    }
}
