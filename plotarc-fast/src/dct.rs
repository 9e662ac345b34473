// Discrete cosine transform smoothing of sentiment sequences
//
// WHY DCT:
// A sentiment sequence is not periodic. A Fourier basis assumes it is, so the
// jump between the last and first sentence shows up as high-frequency energy
// and the reconstruction rings at both ends. The DCT-II basis is the Fourier
// basis of the even (mirrored) extension, which has no such jump, and its
// coefficients are real, so there is no conjugate-symmetry bookkeeping.
//
// PIPELINE:
//   raw (len n) --DCT-II--> spectrum (n) --keep low_pass_size--> keepers
//   keepers --zero-pad to out_len--> padded --DCT-III--> trajectory (out_len)
//
// Zero padding changes the reconstruction resolution, not the retained
// frequency content: it resamples the smooth curve onto out_len points.
//
// SCALING:
// Both directions are orthonormal, so DCT-III(DCT-II(x)) == x. When
// out_len != n the orthonormal inverse would shrink/grow the curve by
// sqrt(n / out_len); the trajectory is multiplied by sqrt(out_len / n) so a
// constant input stays at the same level after resampling. In the identity
// case (low_pass_size == n == out_len) the factor is exactly 1.
//
// Both transforms run in O(n log n) through a length-2n complex FFT.

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, ensure_out_len, ArcError, Result};
use crate::rescale::{apply_scaling, check_scaling};

pub const DEFAULT_LOW_PASS_SIZE: usize = 5;
pub const DEFAULT_OUT_LEN: usize = 100;

/// Options for `dct_transform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DctOptions {
    /// Number of low-frequency coefficients retained
    pub low_pass_size: usize,
    /// Length of the reconstructed trajectory
    pub out_len: usize,
    /// Rescale the trajectory into [-1, 1]
    pub scale_range: bool,
    /// Standardize the trajectory (z-scores)
    pub scale_vals: bool,
}

impl Default for DctOptions {
    fn default() -> Self {
        Self {
            low_pass_size: DEFAULT_LOW_PASS_SIZE,
            out_len: DEFAULT_OUT_LEN,
            scale_range: false,
            scale_vals: false,
        }
    }
}

// ============================================================================
// TRANSFORMS
// ============================================================================

/// Orthonormal type-II DCT.
///
/// ```text
/// X_k = w_k * sum_{n=0}^{N-1} x_n * cos(pi/N * (n + 0.5) * k)
/// w_0 = sqrt(1/N), w_k = sqrt(2/N)
/// ```
pub fn dct2(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }

    // Even extension: x_0 .. x_{n-1}, x_{n-1} .. x_0
    let mut buffer: Vec<Complex<f64>> = input
        .iter()
        .chain(input.iter().rev())
        .map(|&x| Complex::new(x, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(2 * n).process(&mut buffer);

    // Y_k = 2 * exp(i*pi*k/2N) * X_k (unnormalized), so undo the phase and halve
    let (w0, wk) = weights(n);
    buffer
        .iter()
        .take(n)
        .enumerate()
        .map(|(k, y)| {
            let twiddle = Complex::from_polar(1.0, -std::f64::consts::PI * k as f64 / (2 * n) as f64);
            let raw = 0.5 * (y * twiddle).re;
            raw * if k == 0 { w0 } else { wk }
        })
        .collect()
}

/// Orthonormal type-III DCT (inverse of `dct2`).
///
/// ```text
/// x_n = sum_{k=0}^{N-1} w_k * X_k * cos(pi/N * (n + 0.5) * k)
/// ```
pub fn dct3(spectrum: &[f64]) -> Vec<f64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }

    // x_n = Re( sum_k a_k e^{i*pi*k/2N} e^{2*pi*i*k*n/2N} ), an inverse FFT of length 2N
    let (w0, wk) = weights(n);
    let mut buffer: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); 2 * n];
    for (k, &c) in spectrum.iter().enumerate() {
        let a = c * if k == 0 { w0 } else { wk };
        let twiddle = Complex::from_polar(1.0, std::f64::consts::PI * k as f64 / (2 * n) as f64);
        buffer[k] = twiddle * a;
    }

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(2 * n).process(&mut buffer);

    buffer.iter().take(n).map(|c| c.re).collect()
}

fn weights(n: usize) -> (f64, f64) {
    let n = n as f64;
    ((1.0 / n).sqrt(), (2.0 / n).sqrt())
}

// ============================================================================
// SMOOTHING
// ============================================================================

/// Low-pass filter `raw` in the cosine domain and resample to `out_len`.
///
/// # Errors
/// - `InvalidInput` if `raw` is empty or contains NaN/inf
/// - `InvalidParameter` if `low_pass_size` is 0, exceeds `raw.len()`, or
///   exceeds `out_len`, or if `out_len` exceeds [`MAX_OUT_LEN`](crate::errors::MAX_OUT_LEN)
pub fn dct_smooth(raw: &[f64], low_pass_size: usize, out_len: usize) -> Result<Vec<f64>> {
    validate(raw, low_pass_size, out_len)?;
    Ok(smooth_unchecked(raw, low_pass_size, out_len))
}

/// `dct_smooth` plus optional post-scaling.
///
/// # Errors
/// As `dct_smooth`, plus `ConflictingOptions` when both `scale_range` and
/// `scale_vals` are set (checked first), and the rescaler's errors.
pub fn dct_transform(raw: &[f64], options: &DctOptions) -> Result<Vec<f64>> {
    check_scaling(options.scale_range, options.scale_vals)?;
    validate(raw, options.low_pass_size, options.out_len)?;

    let smoothed = smooth_unchecked(raw, options.low_pass_size, options.out_len);
    apply_scaling(smoothed, options.scale_range, options.scale_vals)
}

/// Smooth many independent sequences in parallel.
///
/// All inputs are validated before any transform runs.
pub fn batch_dct_transform(raws: &[Vec<f64>], options: &DctOptions) -> Result<Vec<Vec<f64>>> {
    check_scaling(options.scale_range, options.scale_vals)?;
    for raw in raws {
        validate(raw, options.low_pass_size, options.out_len)?;
    }

    raws.par_iter()
        .map(|raw| {
            let smoothed = smooth_unchecked(raw, options.low_pass_size, options.out_len);
            apply_scaling(smoothed, options.scale_range, options.scale_vals)
        })
        .collect()
}

fn validate(raw: &[f64], low_pass_size: usize, out_len: usize) -> Result<()> {
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
    if low_pass_size > out_len {
        return Err(ArcError::InvalidParameter(format!(
            "low_pass_size ({}) must be less than or equal to out_len ({})",
            low_pass_size, out_len
        )));
    }
    ensure_out_len(out_len)?;
    Ok(())
}

fn smooth_unchecked(raw: &[f64], low_pass_size: usize, out_len: usize) -> Vec<f64> {
    let spectrum = dct2(raw);

    let mut padded = vec![0.0f64; out_len];
    padded[..low_pass_size].copy_from_slice(&spectrum[..low_pass_size]);

    let gain = (out_len as f64 / raw.len() as f64).sqrt();
    dct3(&padded).into_iter().map(|v| v * gain).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Direct O(n^2) orthonormal DCT-II for cross-checking the FFT path
    fn naive_dct2(x: &[f64]) -> Vec<f64> {
        let n = x.len();
        let (w0, wk) = weights(n);
        (0..n)
            .map(|k| {
                let sum: f64 = x
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        v * (std::f64::consts::PI / n as f64 * (i as f64 + 0.5) * k as f64).cos()
                    })
                    .sum();
                sum * if k == 0 { w0 } else { wk }
            })
            .collect()
    }

    fn sample_arc(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                (std::f64::consts::PI * t).sin() + 0.3 * ((i * 7 % 5) as f64 - 2.0) / 2.0
            })
            .collect()
    }

    #[test]
    fn test_dct2_matches_definition() {
        let x = [0.5, -1.0, 2.0, 0.0, 3.5, -0.25, 1.0];
        let fast = dct2(&x);
        let slow = naive_dct2(&x);
        for (a, b) in fast.iter().zip(slow.iter()) {
            assert!(approx_eq(*a, *b), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_dct_round_trip_is_identity() {
        for n in [1usize, 2, 3, 8, 17, 64] {
            let x = sample_arc(n);
            let back = dct3(&dct2(&x));
            for (a, b) in x.iter().zip(back.iter()) {
                assert!(approx_eq(*a, *b), "n={}: {} vs {}", n, a, b);
            }
        }
    }

    #[test]
    fn test_dc_coefficient_is_scaled_mean() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let spectrum = dct2(&x);
        // X_0 = sum / sqrt(n) = 10 / 2
        assert!(approx_eq(spectrum[0], 5.0));
    }

    #[test]
    fn test_identity_filter_reproduces_input() {
        let raw = sample_arc(40);
        let out = dct_smooth(&raw, raw.len(), raw.len()).unwrap();
        assert_eq!(out.len(), raw.len());
        for (a, b) in raw.iter().zip(out.iter()) {
            assert!(approx_eq(*a, *b));
        }
    }

    #[test]
    fn test_output_length_is_out_len() {
        for len in [5usize, 13, 100, 257] {
            let raw = sample_arc(len);
            for out_len in [5usize, 10, 100, 333] {
                let out = dct_smooth(&raw, 5, out_len).unwrap();
                assert_eq!(out.len(), out_len);
                assert!(out.iter().all(|v| v.is_finite()));
            }
        }
    }

    #[test]
    fn test_constant_signal_keeps_level_after_resampling() {
        let raw = vec![0.75; 30];
        let out = dct_smooth(&raw, 3, 100).unwrap();
        for v in out {
            assert!(approx_eq(v, 0.75));
        }
    }

    #[test]
    fn test_low_pass_smooths_noise() {
        // Alternating noise lives at the top of the spectrum and is removed
        let raw: Vec<f64> = (0..50).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let out = dct_smooth(&raw, 3, 50).unwrap();
        let max_abs = out.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(max_abs < 0.2, "max_abs = {}", max_abs);
    }

    #[test]
    fn test_smoothed_arc_peaks_in_the_middle() {
        let raw = sample_arc(200);
        let out = dct_smooth(&raw, 3, 100).unwrap();
        let peak = out
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert!((35..65).contains(&peak), "peak at {}", peak);
    }

    #[test]
    fn test_parameter_errors() {
        let raw = [1.0, 2.0, 3.0];
        assert!(matches!(dct_smooth(&raw, 4, 100), Err(ArcError::InvalidParameter(_))));
        assert!(matches!(dct_smooth(&raw, 0, 100), Err(ArcError::InvalidParameter(_))));
        assert!(matches!(dct_smooth(&raw, 3, 2), Err(ArcError::InvalidParameter(_))));
        assert!(matches!(dct_smooth(&[], 1, 10), Err(ArcError::InvalidInput(_))));
    }

    #[test]
    fn test_huge_out_len_is_rejected() {
        let raw = sample_arc(10);
        assert!(matches!(
            dct_smooth(&raw, 5, usize::MAX),
            Err(ArcError::InvalidParameter(_))
        ));
        assert!(matches!(
            dct_smooth(&raw, 5, crate::errors::MAX_OUT_LEN + 1),
            Err(ArcError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_conflicting_options_checked_before_parameters() {
        let options = DctOptions {
            low_pass_size: 99,
            out_len: 10,
            scale_range: true,
            scale_vals: true,
        };
        assert!(matches!(
            dct_transform(&[1.0, 2.0], &options),
            Err(ArcError::ConflictingOptions(_))
        ));
    }

    #[test]
    fn test_transform_scale_range() {
        let raw = sample_arc(60);
        let options = DctOptions {
            scale_range: true,
            ..DctOptions::default()
        };
        let out = dct_transform(&raw, &options).unwrap();
        let lo = out.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = out.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(approx_eq(lo, -1.0));
        assert!(approx_eq(hi, 1.0));
    }

    #[test]
    fn test_batch_matches_single() {
        let raws = vec![sample_arc(20), sample_arc(33)];
        let options = DctOptions::default();
        let batch = batch_dct_transform(&raws, &options).unwrap();
        for (raw, out) in raws.iter().zip(batch.iter()) {
            assert_eq!(out, &dct_transform(raw, &options).unwrap());
        }
    }

    #[test]
    fn test_batch_validates_everything_first() {
        let raws = vec![sample_arc(20), vec![1.0]];
        assert!(batch_dct_transform(&raws, &DctOptions::default()).is_err());
    }
}
