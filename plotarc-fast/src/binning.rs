//! Percentage binning: split a sequence into `bins` contiguous chunks of
//! (nearly) equal length and reduce each to its mean.
//!
//! The cut follows the classic equal-width interval rule: the 1-based index
//! range `[1, len]` is divided into `bins` right-closed intervals
//! `(b[j-1], b[j]]`, with the outer breaks widened by 0.1% of the range so
//! that index 1 and index `len` are both inside. Every element lands in the
//! interval containing its index.

use crate::errors::{ensure_finite, ArcError, Result};

/// Mean of each bin, as `(bin_index, mean)` with 1-based sequential indices.
///
/// # Errors
/// - `InvalidParameter` when `bins == 0`
/// - `InsufficientData` when `xs.len() < 2 * bins`
/// - `InvalidInput` for non-finite values
pub fn bin_means(xs: &[f64], bins: usize) -> Result<Vec<(usize, f64)>> {
    if bins == 0 {
        return Err(ArcError::InvalidParameter(
            "bins must be at least 1".to_string(),
        ));
    }
    let needed = bins.saturating_mul(2);
    if xs.len() < needed {
        return Err(ArcError::InsufficientData {
            needed,
            got: xs.len(),
        });
    }
    ensure_finite(xs, "values")?;

    let labels = bin_labels(xs.len(), bins);

    let mut sums = vec![0.0f64; bins];
    let mut counts = vec![0usize; bins];
    for (&x, &label) in xs.iter().zip(labels.iter()) {
        sums[label] += x;
        counts[label] += 1;
    }

    // With len >= 2 * bins every interval is at least ~2 wide, so no bin
    // is ever empty.
    Ok(sums
        .into_iter()
        .zip(counts)
        .enumerate()
        .map(|(i, (sum, count))| (i + 1, sum / count as f64))
        .collect())
}

/// Zero-based bin label for each position `0..len`.
pub fn bin_labels(len: usize, bins: usize) -> Vec<usize> {
    if len == 0 || bins == 0 {
        return Vec::new();
    }

    let breaks = interval_breaks(len, bins);
    let mut labels = Vec::with_capacity(len);
    let mut current = 0usize;
    for i in 1..=len {
        let idx = i as f64;
        // Indices increase monotonically, so the interval pointer only moves forward
        while current + 1 < bins && idx > breaks[current + 1] {
            current += 1;
        }
        labels.push(current);
    }
    labels
}

/// `bins + 1` break points over `[1, len]`, outer ones widened by range/1000.
fn interval_breaks(len: usize, bins: usize) -> Vec<f64> {
    let from = 1.0;
    let to = len as f64;
    let span = to - from;
    let step = span / bins as f64;

    let mut breaks: Vec<f64> = (0..=bins).map(|j| from + j as f64 * step).collect();
    breaks[0] = from - span / 1000.0;
    breaks[bins] = to + span / 1000.0;
    breaks
}
