//! Error types for projection operations.

use thiserror::Error;

use fairval_core::CoreError;

/// A specialized Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Errors that can occur during schedule generation and cash-flow
/// projection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// Maturity is not after the issue date.
    #[error("Invalid schedule window: maturity {maturity} is not after issue {issue}")]
    InvalidScheduleWindow {
        /// Issue date (ISO 8601).
        issue: String,
        /// Maturity date (ISO 8601).
        maturity: String,
    },

    /// No projection engine is registered for the instrument type.
    #[error("Unsupported instrument type: '{value}'")]
    UnsupportedInstrumentType {
        /// The unrecognized instrument type string.
        value: String,
    },

    /// Security terms failed validation.
    #[error("Invalid security terms: {reason}")]
    InvalidTerms {
        /// Description of what's invalid.
        reason: String,
    },

    /// Attempted to settle an event that already reached a terminal status.
    #[error("Invalid status transition for event {sequence}: already settled")]
    InvalidStatusTransition {
        /// Sequence ordinal of the offending event.
        sequence: u32,
    },

    /// No event with the given sequence exists in the projection.
    #[error("Unknown cash-flow event: {sequence}")]
    UnknownEvent {
        /// Requested sequence ordinal.
        sequence: u32,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl ProjectionError {
    /// Creates an invalid schedule window error.
    #[must_use]
    pub fn invalid_window(issue: impl ToString, maturity: impl ToString) -> Self {
        Self::InvalidScheduleWindow {
            issue: issue.to_string(),
            maturity: maturity.to_string(),
        }
    }

    /// Creates an invalid terms error.
    #[must_use]
    pub fn invalid_terms(reason: impl Into<String>) -> Self {
        Self::InvalidTerms {
            reason: reason.into(),
        }
    }
}
