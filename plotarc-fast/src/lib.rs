//! plotarc_fast - numeric core for narrative sentiment arcs
//!
//! Turns a per-sentence sentiment sequence into a smoothed, length-normalized
//! trajectory and provides the small utilities around it:
//!
//! - [`lexicon`]: word tables and the multiset scorer
//! - [`rescale`]: [-1, 1], divide-by-max and z-score rescaling
//! - [`binning`]: equal-width percentage bins
//! - [`dct`]: DCT low-pass smoothing and resampling (preferred)
//! - [`fft`]: legacy padded-FFT smoothing
//! - [`entropy`]: mixed-message entropy over token signs
//! - [`tokenize`]: word and sentence splitting
//!
//! Everything here is pure and synchronous; batch helpers use rayon over
//! independent inputs.

pub mod binning;
pub mod dct;
pub mod entropy;
pub mod errors;
pub mod fft;
pub mod lexicon;
pub mod rescale;
pub mod tokenize;

#[cfg(feature = "python")]
mod python;

pub use binning::bin_means;
pub use dct::{dct_smooth, dct_transform, DctOptions};
pub use entropy::{mixed_message_entropy, MixedMessages};
pub use errors::{ArcError, Result};
pub use fft::{fft_smooth, fft_transform, FftOptions};
pub use lexicon::{emotion_counts, score, Category, EmotionCounts, Lexicon, LexiconEntry};
pub use rescale::{narrative_time, rescale_linear, rescale_unit, zscore, NarrativeTime};
