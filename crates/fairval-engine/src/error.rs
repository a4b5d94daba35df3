//! Engine error types.

use thiserror::Error;

use fairval_curves::CurveError;
use fairval_instruments::ProjectionError;

use crate::run::{RunId, RunStatus};
use crate::store::StoreError;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while orchestrating valuation runs.
#[derive(Error, Debug)]
pub enum EngineError {
    /// No run exists with the given id.
    #[error("Unknown run: {run_id}")]
    UnknownRun {
        /// The requested run id.
        run_id: RunId,
    },

    /// The target already has a pending or running run.
    #[error("Target {target_id} already has an active run: {run_id}")]
    RunAlreadyInProgress {
        /// The target security id.
        target_id: String,
        /// Id of the active run.
        run_id: RunId,
    },

    /// The run already left the pending state and cannot be executed again.
    #[error("Run {run_id} is not pending: {status}")]
    RunNotPending {
        /// The run id.
        run_id: RunId,
        /// Current status of the run.
        status: RunStatus,
    },

    /// The run type has no execution path.
    #[error("Unsupported run type: '{value}'")]
    UnsupportedRunType {
        /// The run type string as submitted.
        value: String,
    },

    /// No security terms are stored for the security.
    #[error("Unknown security: {security_id}")]
    UnknownSecurity {
        /// The security id.
        security_id: String,
    },

    /// No discount specification is stored for the security.
    #[error("Missing discount spec for security: {security_id}")]
    MissingDiscountSpec {
        /// The security id.
        security_id: String,
    },

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Persistence(#[from] StoreError),

    /// Curve resolution failure.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Cash-flow projection failure.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),
}
