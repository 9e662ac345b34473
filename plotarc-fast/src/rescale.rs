//! Linear rescaling of sentiment sequences.
//!
//! - `rescale_linear`: min -> -1, max -> +1
//! - `rescale_unit`: divide by max (zero stays zero; negatives stay negative)
//! - `zscore`: subtract mean, divide by sample standard deviation
//! - `narrative_time`: x positions in (0, 1] plus the unit and z-score views

use serde::Serialize;

use crate::errors::{ensure_finite, ArcError, Result};

/// Map `xs` linearly so that `min(xs) -> -1` and `max(xs) -> +1`.
///
/// `y_i = 2 * (x_i - min) / (max - min) - 1`
///
/// # Errors
/// - `InvalidInput` for empty or non-finite input
/// - `DivisionByZero` when every value is equal
pub fn rescale_linear(xs: &[f64]) -> Result<Vec<f64>> {
    ensure_finite(xs, "values")?;

    let (min, max) = min_max(xs);
    let range = max - min;
    if range == 0.0 {
        return Err(ArcError::DivisionByZero(format!(
            "cannot rescale a constant sequence (min == max == {})",
            min
        )));
    }

    Ok(xs.iter().map(|x| 2.0 * (x - min) / range - 1.0).collect())
}

/// Divide every value by `max(xs)`.
///
/// Zero is a fixed point. This is NOT a true [0, 1] rescale: negative inputs
/// come out below zero, and callers rely on that, so it is kept as is.
///
/// # Errors
/// - `InvalidInput` for empty or non-finite input
/// - `DivisionByZero` when `max == 0`
/// - `InvalidParameter` when `max < 0` (every value negative)
pub fn rescale_unit(xs: &[f64]) -> Result<Vec<f64>> {
    ensure_finite(xs, "values")?;

    let (_, max) = min_max(xs);
    if max == 0.0 {
        return Err(ArcError::DivisionByZero(
            "cannot divide by a maximum of 0".to_string(),
        ));
    }
    if max < 0.0 {
        return Err(ArcError::InvalidParameter(format!(
            "unit rescale needs a positive maximum, got {}",
            max
        )));
    }

    Ok(xs.iter().map(|x| x / max).collect())
}

/// Standardize to zero mean and unit sample standard deviation (n - 1).
pub fn zscore(xs: &[f64]) -> Result<Vec<f64>> {
    ensure_finite(xs, "values")?;
    if xs.len() < 2 {
        return Err(ArcError::DivisionByZero(
            "standard deviation needs at least two values".to_string(),
        ));
    }

    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let sd = var.sqrt();
    if sd == 0.0 {
        return Err(ArcError::DivisionByZero(
            "standard deviation is 0".to_string(),
        ));
    }

    Ok(xs.iter().map(|x| (x - mean) / sd).collect())
}

/// Three aligned views of one sequence for plotting against narrative time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeTime {
    /// Relative position `i / len` for 1-based i
    pub x: Vec<f64>,
    /// `rescale_unit` of the values
    pub y: Vec<f64>,
    /// `zscore` of the values
    pub z: Vec<f64>,
}

pub fn narrative_time(xs: &[f64]) -> Result<NarrativeTime> {
    let y = rescale_unit(xs)?;
    let z = zscore(xs)?;
    let len = xs.len() as f64;
    let x = (1..=xs.len()).map(|i| i as f64 / len).collect();
    Ok(NarrativeTime { x, y, z })
}

/// Post-processing shared by the transform engines.
///
/// `scale_range` and `scale_vals` are mutually exclusive; call
/// `check_scaling` before doing any work so the conflict surfaces first.
pub(crate) fn check_scaling(scale_range: bool, scale_vals: bool) -> Result<()> {
    if scale_range && scale_vals {
        return Err(ArcError::ConflictingOptions(
            "scale_range and scale_vals cannot both be true".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn apply_scaling(values: Vec<f64>, scale_range: bool, scale_vals: bool) -> Result<Vec<f64>> {
    check_scaling(scale_range, scale_vals)?;
    if scale_range {
        rescale_linear(&values)
    } else if scale_vals {
        zscore(&values)
    } else {
        Ok(values)
    }
}

fn min_max(xs: &[f64]) -> (f64, f64) {
    xs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
        (lo.min(x), hi.max(x))
    })
}
