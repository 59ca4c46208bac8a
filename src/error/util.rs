//! Utility functions for error handling
//!
//! Convenience constructors and domain checks used throughout the
//! validation layer, kept beside the error enum.

use std::path::Path;

use crate::error::{AssessmentError, Result};

/// Check that a real-valued input lies inside its declared closed domain.
///
/// # Arguments
/// * `field` - Human-readable field name (used in the error message)
/// * `value` - The value to check
/// * `min` / `max` - Inclusive domain bounds
pub fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(AssessmentError::RangeError {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Check that an integer count lies inside its declared closed domain.
pub fn check_count(field: &str, value: u32, max: u32) -> Result<()> {
    if value <= max {
        Ok(())
    } else {
        Err(AssessmentError::RangeError {
            field: field.to_string(),
            value: f64::from(value),
            min: 0.0,
            max: f64::from(max),
        })
    }
}

/// Construct a `DivisionByZero` error for the named quantity.
#[must_use]
pub fn division_by_zero(quantity: &str) -> AssessmentError {
    AssessmentError::DivisionByZero {
        quantity: quantity.to_string(),
    }
}

/// Construct an `ArtifactUnavailable` error for the named artifact.
#[must_use]
pub fn artifact_unavailable(name: &str, reason: impl std::fmt::Display) -> AssessmentError {
    AssessmentError::ArtifactUnavailable {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Construct an `ArtifactUnavailable` error carrying the offending path.
#[must_use]
pub fn artifact_io_error(
    name: &str,
    path: &Path,
    error: &std::io::Error,
) -> AssessmentError {
    AssessmentError::ArtifactUnavailable {
        name: name.to_string(),
        reason: format!("{} ({})", error, path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_accepts_bounds() {
        assert!(check_range("x", 0.0, 0.0, 100.0).is_ok());
        assert!(check_range("x", 100.0, 0.0, 100.0).is_ok());
    }

    #[test]
    fn range_check_rejects_nan_and_out_of_domain() {
        assert!(check_range("x", f64::NAN, 0.0, 100.0).is_err());
        assert!(check_range("x", 100.1, 0.0, 100.0).is_err());
        assert!(check_range("x", -0.1, 0.0, 100.0).is_err());
    }

    #[test]
    fn count_check_rejects_above_max() {
        assert!(check_count("cores", 30, 30).is_ok());
        assert!(check_count("cores", 31, 30).is_err());
    }
}
