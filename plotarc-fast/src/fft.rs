//! Legacy Fourier smoothing.
//!
//! Kept so older trajectories can be reproduced bit for bit. New callers
//! should use [`crate::dct`], which has no edge artifacts and no
//! conjugate-symmetry bookkeeping.
//!
//! Steps:
//! 1. Append `padding_factor * n` zeros to reduce leakage from the
//!    non-periodic input.
//! 2. Forward FFT.
//! 3. Keep the first `L = low_pass_size * (1 + padding_factor)` bins.
//! 4. Build a conjugate-symmetric spectrum of length
//!    `M = out_len * (1 + padding_factor)`:
//!    `keepers ++ zeros(M - 2L + 1) ++ reverse(conj(bins 1..L))`.
//! 5. Unnormalized inverse FFT and keep the real part of the first
//!    `out_len` samples.
//!
//! The inverse is deliberately not divided by `M`: legacy outputs carry that
//! scale and downstream comparisons depend on it.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{ensure_finite, ensure_out_len, ArcError, Result};
use crate::rescale::{apply_scaling, check_scaling};

pub const DEFAULT_LOW_PASS_SIZE: usize = 2;
pub const DEFAULT_OUT_LEN: usize = 100;
pub const DEFAULT_PADDING_FACTOR: usize = 2;

/// Longest padded input or output spectrum the engine will allocate.
pub const MAX_SPECTRUM_LEN: usize = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FftOptions {
    pub low_pass_size: usize,
    pub out_len: usize,
    pub padding_factor: usize,
    pub scale_range: bool,
    pub scale_vals: bool,
}

impl Default for FftOptions {
    fn default() -> Self {
        Self {
            low_pass_size: DEFAULT_LOW_PASS_SIZE,
            out_len: DEFAULT_OUT_LEN,
            padding_factor: DEFAULT_PADDING_FACTOR,
            scale_range: false,
            scale_vals: false,
        }
    }
}

/// Smooth `raw` with the legacy padded-FFT low-pass filter.
///
/// # Errors
/// - `InvalidInput` for empty or non-finite input
/// - `InvalidParameter` if `low_pass_size` is 0 or exceeds `raw.len()`, if
///   the output spectrum is too short to hold the mirrored keepers, or if
///   `out_len` or the padded lengths exceed the engine limits
pub fn fft_smooth(
    raw: &[f64],
    low_pass_size: usize,
    out_len: usize,
    padding_factor: usize,
) -> Result<Vec<f64>> {
    validate(raw, low_pass_size, out_len, padding_factor)?;
    warn!("legacy FFT smoothing in use; prefer the DCT transform");
    Ok(smooth_unchecked(raw, low_pass_size, out_len, padding_factor))
}

/// `fft_smooth` plus optional post-scaling.
pub fn fft_transform(raw: &[f64], options: &FftOptions) -> Result<Vec<f64>> {
    check_scaling(options.scale_range, options.scale_vals)?;
    let smoothed = fft_smooth(
        raw,
        options.low_pass_size,
        options.out_len,
        options.padding_factor,
    )?;
    apply_scaling(smoothed, options.scale_range, options.scale_vals)
}

fn validate(raw: &[f64], low_pass_size: usize, out_len: usize, padding_factor: usize) -> Result<()> {
    ensure_finite(raw, "raw values")?;
    if low_pass_size == 0 {
        return Err(ArcError::InvalidParameter(
            "low_pass_size must be at least 1".to_string(),
        ));
    }
    if low_pass_size > raw.len() {
        return Err(ArcError::InvalidParameter(format!(
            "low_pass_size ({}) must be less than or equal to the length of the input ({})",
            low_pass_size,
            raw.len()
        )));
    }

    ensure_out_len(out_len)?;

    let factor = padding_factor.checked_add(1);
    let lengths = factor.and_then(|f| {
        Some((
            raw.len().checked_mul(f)?,
            low_pass_size.checked_mul(f)?,
            out_len.checked_mul(f)?,
        ))
    });
    let (padded_len, keep, spectrum_len) = match lengths {
        Some((padded, keep, spectrum)) if padded.max(spectrum) <= MAX_SPECTRUM_LEN => {
            (padded, keep, spectrum)
        }
        _ => {
            return Err(ArcError::InvalidParameter(format!(
                "padding_factor ({}) makes the spectrum longer than {} samples",
                padding_factor, MAX_SPECTRUM_LEN
            )))
        }
    };
    // keep <= padded_len, so 2 * keep cannot overflow
    debug_assert!(keep <= padded_len);
    if spectrum_len + 1 < 2 * keep {
        return Err(ArcError::InvalidParameter(format!(
            "out_len ({}) is too short for low_pass_size ({}) with padding_factor ({})",
            out_len, low_pass_size, padding_factor
        )));
    }
    Ok(())
}

fn smooth_unchecked(raw: &[f64], low_pass_size: usize, out_len: usize, padding_factor: usize) -> Vec<f64> {
    let padded_len = raw.len() * (1 + padding_factor);
    let mut buffer: Vec<Complex<f64>> = raw
        .iter()
        .map(|&x| Complex::new(x, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(padded_len)
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(padded_len).process(&mut buffer);

    let keep = low_pass_size * (1 + padding_factor);
    let spectrum_len = out_len * (1 + padding_factor);
    let gap = spectrum_len + 1 - 2 * keep;

    let mut spectrum: Vec<Complex<f64>> = Vec::with_capacity(spectrum_len);
    spectrum.extend_from_slice(&buffer[..keep]);
    spectrum.extend(std::iter::repeat(Complex::new(0.0, 0.0)).take(gap));
    spectrum.extend(buffer[1..keep].iter().rev().map(|c| c.conj()));
    debug_assert_eq!(spectrum.len(), spectrum_len);

    planner.plan_fft_inverse(spectrum_len).process(&mut spectrum);

    spectrum.iter().take(out_len).map(|c| c.re).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correlation(a: &[f64], b: &[f64]) -> f64 {
        let n = a.len() as f64;
        let ma = a.iter().sum::<f64>() / n;
        let mb = b.iter().sum::<f64>() / n;
        let cov: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
        let va: f64 = a.iter().map(|x| (x - ma).powi(2)).sum();
        let vb: f64 = b.iter().map(|y| (y - mb).powi(2)).sum();
        cov / (va.sqrt() * vb.sqrt())
    }

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 / n as f64).collect()
    }

    #[test]
    fn test_output_length() {
        let raw = ramp(37);
        for out_len in [10usize, 100, 250] {
            let out = fft_smooth(&raw, 2, out_len, 2).unwrap();
            assert_eq!(out.len(), out_len);
            assert!(out.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_spectrum_is_conjugate_symmetric_so_output_is_real() {
        // Rebuild the spectrum by hand and check the imaginary residue
        let raw = ramp(16);
        let (lps, out_len, pf) = (3, 20, 1);
        let padded_len = raw.len() * (1 + pf);
        let mut buffer: Vec<Complex<f64>> = raw
            .iter()
            .map(|&x| Complex::new(x, 0.0))
            .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
            .take(padded_len)
            .collect();
        let mut planner = FftPlanner::<f64>::new();
        planner.plan_fft_forward(padded_len).process(&mut buffer);

        let keep = lps * (1 + pf);
        let m = out_len * (1 + pf);
        let mut spectrum: Vec<Complex<f64>> = buffer[..keep].to_vec();
        spectrum.extend(std::iter::repeat(Complex::new(0.0, 0.0)).take(m + 1 - 2 * keep));
        spectrum.extend(buffer[1..keep].iter().rev().map(|c| c.conj()));
        planner.plan_fft_inverse(m).process(&mut spectrum);

        let scale = spectrum.iter().map(|c| c.re.abs()).fold(0.0, f64::max);
        for c in &spectrum {
            assert!(c.im.abs() < 1e-9 * scale.max(1.0));
        }
    }

    #[test]
    fn test_low_pass_tracks_input_shape() {
        // A single hump that falls to zero at both ends, like a simple arc
        let n = 40;
        let raw: Vec<f64> = (0..n)
            .map(|i| (std::f64::consts::PI * (i as f64 + 0.5) / n as f64).sin())
            .collect();
        let out = fft_smooth(&raw, 2, n, 2).unwrap();
        assert!(correlation(&raw, &out) > 0.95);
        // Unnormalized inverse: values carry the spectrum-length scale
        let peak = out.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_short_output_spectrum_is_rejected() {
        // Keeping every bin without room to mirror them is not representable
        let raw = ramp(24);
        assert!(matches!(
            fft_smooth(&raw, raw.len(), raw.len(), 0),
            Err(ArcError::InvalidParameter(_))
        ));
        assert!(fft_smooth(&raw, raw.len(), 2 * raw.len(), 0).is_ok());
    }

    #[test]
    fn test_parameter_errors() {
        let raw = ramp(4);
        assert!(matches!(fft_smooth(&raw, 5, 100, 2), Err(ArcError::InvalidParameter(_))));
        assert!(matches!(fft_smooth(&raw, 0, 100, 2), Err(ArcError::InvalidParameter(_))));
        // L = 4 * 3 = 12 needs M >= 23, out_len 5 gives M = 15
        assert!(matches!(fft_smooth(&raw, 4, 5, 2), Err(ArcError::InvalidParameter(_))));
        assert!(matches!(fft_smooth(&[], 1, 10, 2), Err(ArcError::InvalidInput(_))));
    }

    #[test]
    fn test_overflowing_lengths_are_rejected() {
        let raw = ramp(10);
        assert!(matches!(
            fft_smooth(&raw, 1, 10, usize::MAX),
            Err(ArcError::InvalidParameter(_))
        ));
        assert!(matches!(
            fft_smooth(&raw, 2, usize::MAX / 2, 2),
            Err(ArcError::InvalidParameter(_))
        ));
        assert!(matches!(
            fft_smooth(&raw, 2, 100, MAX_SPECTRUM_LEN),
            Err(ArcError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_conflicting_options() {
        let options = FftOptions {
            scale_range: true,
            scale_vals: true,
            ..FftOptions::default()
        };
        assert!(matches!(
            fft_transform(&ramp(10), &options),
            Err(ArcError::ConflictingOptions(_))
        ));
    }

    #[test]
    fn test_scale_range_output() {
        let options = FftOptions {
            scale_range: true,
            ..FftOptions::default()
        };
        let out = fft_transform(&ramp(30), &options).unwrap();
        let lo = out.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = out.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((lo + 1.0).abs() < 1e-9);
        assert!((hi - 1.0).abs() < 1e-9);
    }
}
