//! Persistence trait for valuation state.

use async_trait::async_trait;
use thiserror::Error;

use fairval_core::types::Date;
use fairval_curves::{Curve, DiscountSpec};
use fairval_instruments::SecurityTerms;

use crate::audit::AuditEntry;
use crate::result::PriceResult;
use crate::run::{RunId, ValuationRun};

/// A specialized Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not serve the request.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Backend-specific description.
        message: String,
    },
}

impl StoreError {
    /// Creates a backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Persistence boundary of the valuation engine.
///
/// Backends (in-memory, embedded database, remote service) implement this
/// trait; the engine never touches a concrete store. Writes are upserts
/// except audit entries, which are append-only.
#[async_trait]
pub trait ValuationStore: Send + Sync {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Stores security terms, replacing any existing record.
    async fn save_terms(&self, terms: &SecurityTerms) -> StoreResult<()>;

    /// Loads security terms by id.
    async fn load_terms(&self, security_id: &str) -> StoreResult<Option<SecurityTerms>>;

    /// Stores a discount spec keyed by its security id.
    async fn save_discount_spec(&self, spec: &DiscountSpec) -> StoreResult<()>;

    /// Loads the discount spec for a security.
    async fn load_discount_spec(&self, security_id: &str) -> StoreResult<Option<DiscountSpec>>;

    /// Stores a curve snapshot keyed by name and curve date.
    async fn save_curve(&self, curve: &Curve) -> StoreResult<()>;

    /// Loads a curve snapshot by name and curve date.
    async fn load_curve(&self, name: &str, curve_date: Date) -> StoreResult<Option<Curve>>;

    /// Stores a run record, replacing any existing state.
    async fn save_run(&self, run: &ValuationRun) -> StoreResult<()>;

    /// Loads a run by id.
    async fn load_run(&self, run_id: RunId) -> StoreResult<Option<ValuationRun>>;

    /// Stores one price result.
    async fn save_price_result(&self, result: &PriceResult) -> StoreResult<()>;

    /// Loads all price results of a run, ordered by security id.
    async fn load_price_results(&self, run_id: RunId) -> StoreResult<Vec<PriceResult>>;

    /// Appends an audit entry.
    async fn append_audit(&self, entry: &AuditEntry) -> StoreResult<()>;

    /// Loads the audit trail of a run in append order.
    async fn load_audit(&self, run_id: RunId) -> StoreResult<Vec<AuditEntry>>;
}
