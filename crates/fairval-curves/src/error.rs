//! Error types for curve operations.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur during curve construction and lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// Curve has no points.
    #[error("Curve '{curve_name}' has no points")]
    EmptyCurve {
        /// Name of the offending curve.
        curve_name: String,
    },

    /// A curve point failed validation.
    #[error("Invalid curve point: {reason}")]
    InvalidPoint {
        /// Description of what's invalid.
        reason: String,
    },

    /// Curve points are not strictly increasing by year fraction.
    #[error(
        "Curve '{curve_name}' points are not strictly increasing at index {index}"
    )]
    UnsortedCurvePoints {
        /// Name of the offending curve.
        curve_name: String,
        /// Index of the first out-of-order point.
        index: usize,
    },

    /// No curve matched the requested name and date.
    #[error("Curve not found: '{curve_name}' as of {curve_date}")]
    CurveNotFound {
        /// Requested curve name.
        curve_name: String,
        /// Requested curve date (ISO 8601).
        curve_date: String,
    },
}

impl CurveError {
    /// Creates an invalid point error.
    #[must_use]
    pub fn invalid_point(reason: impl Into<String>) -> Self {
        Self::InvalidPoint {
            reason: reason.into(),
        }
    }

    /// Creates a curve not found error.
    #[must_use]
    pub fn not_found(curve_name: impl Into<String>, curve_date: impl ToString) -> Self {
        Self::CurveNotFound {
            curve_name: curve_name.into(),
            curve_date: curve_date.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::not_found("USD_GOVT", "2025-01-15");
        assert!(err.to_string().contains("USD_GOVT"));
        assert!(err.to_string().contains("2025-01-15"));
    }
}
