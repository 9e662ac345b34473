//! Error taxonomy for the numeric core.
//!
//! Every check runs before any computation starts, so a returned error
//! always means no partial result was produced.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArcError {
    /// Input has the wrong shape: empty, non-finite values, empty filters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A numeric parameter is outside its domain (e.g. low_pass_size > len).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two mutually exclusive options were both requested.
    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),

    /// Binning needs at least two values per bin.
    #[error("Insufficient data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Degenerate range (max == min, max == 0, zero deviation).
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

pub type Result<T> = std::result::Result<T, ArcError>;

/// Longest trajectory either transform engine will build.
pub const MAX_OUT_LEN: usize = 1 << 20;

/// Reject trajectory lengths that cannot be allocated sensibly.
pub(crate) fn ensure_out_len(out_len: usize) -> Result<()> {
    if out_len > MAX_OUT_LEN {
        return Err(ArcError::InvalidParameter(format!(
            "out_len ({}) must be at most {}",
            out_len, MAX_OUT_LEN
        )));
    }
    Ok(())
}

/// Reject empty sequences and NaN/inf values.
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(ArcError::InvalidInput(format!("{} must not be empty", what)));
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(ArcError::InvalidInput(format!(
            "{} contains a non-finite value at index {}",
            what, pos
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite(&[1.0, 2.0], "xs").is_ok());
        assert!(matches!(ensure_finite(&[], "xs"), Err(ArcError::InvalidInput(_))));
        let err = ensure_finite(&[1.0, f64::NAN], "xs").unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_out_len_limit() {
        assert!(ensure_out_len(MAX_OUT_LEN).is_ok());
        assert!(matches!(
            ensure_out_len(usize::MAX),
            Err(ArcError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = ArcError::InsufficientData { needed: 6, got: 4 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: need at least 6 values, got 4"
        );
    }
}
