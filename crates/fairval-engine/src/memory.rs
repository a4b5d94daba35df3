//! In-memory store.

use async_trait::async_trait;
use dashmap::DashMap;

use fairval_core::types::Date;
use fairval_curves::{Curve, DiscountSpec};
use fairval_instruments::SecurityTerms;

use crate::audit::AuditEntry;
use crate::result::PriceResult;
use crate::run::{RunId, ValuationRun};
use crate::store::{StoreResult, ValuationStore};

/// Concurrent in-memory [`ValuationStore`].
///
/// Backs tests and development setups; nothing survives a restart.
///
/// # Example
///
/// ```rust
/// use fairval_engine::{MemoryStore, ValuationStore};
///
/// let store = MemoryStore::new();
/// assert_eq!(store.backend_name(), "memory");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    terms: DashMap<String, SecurityTerms>,
    discount_specs: DashMap<String, DiscountSpec>,
    curves: DashMap<(String, Date), Curve>,
    runs: DashMap<RunId, ValuationRun>,
    results: DashMap<RunId, Vec<PriceResult>>,
    audit: DashMap<RunId, Vec<AuditEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all stored data.
    pub fn clear(&self) {
        self.terms.clear();
        self.discount_specs.clear();
        self.curves.clear();
        self.runs.clear();
        self.results.clear();
        self.audit.clear();
    }
}

#[async_trait]
impl ValuationStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn save_terms(&self, terms: &SecurityTerms) -> StoreResult<()> {
        self.terms
            .insert(terms.security_id().to_string(), terms.clone());
        Ok(())
    }

    async fn load_terms(&self, security_id: &str) -> StoreResult<Option<SecurityTerms>> {
        Ok(self.terms.get(security_id).map(|t| t.clone()))
    }

    async fn save_discount_spec(&self, spec: &DiscountSpec) -> StoreResult<()> {
        self.discount_specs
            .insert(spec.security_id().to_string(), spec.clone());
        Ok(())
    }

    async fn load_discount_spec(&self, security_id: &str) -> StoreResult<Option<DiscountSpec>> {
        Ok(self.discount_specs.get(security_id).map(|s| s.clone()))
    }

    async fn save_curve(&self, curve: &Curve) -> StoreResult<()> {
        self.curves
            .insert((curve.name().to_string(), curve.curve_date()), curve.clone());
        Ok(())
    }

    async fn load_curve(&self, name: &str, curve_date: Date) -> StoreResult<Option<Curve>> {
        Ok(self
            .curves
            .get(&(name.to_string(), curve_date))
            .map(|c| c.clone()))
    }

    async fn save_run(&self, run: &ValuationRun) -> StoreResult<()> {
        self.runs.insert(run.id(), run.clone());
        Ok(())
    }

    async fn load_run(&self, run_id: RunId) -> StoreResult<Option<ValuationRun>> {
        Ok(self.runs.get(&run_id).map(|r| r.clone()))
    }

    async fn save_price_result(&self, result: &PriceResult) -> StoreResult<()> {
        self.results
            .entry(result.run_id())
            .or_default()
            .push(result.clone());
        Ok(())
    }

    async fn load_price_results(&self, run_id: RunId) -> StoreResult<Vec<PriceResult>> {
        let mut results = self
            .results
            .get(&run_id)
            .map(|r| r.clone())
            .unwrap_or_default();
        results.sort_by(|a, b| a.security_id().cmp(b.security_id()));
        Ok(results)
    }

    async fn append_audit(&self, entry: &AuditEntry) -> StoreResult<()> {
        self.audit
            .entry(entry.run_id)
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn load_audit(&self, run_id: RunId) -> StoreResult<Vec<AuditEntry>> {
        Ok(self.audit.get(&run_id).map(|a| a.clone()).unwrap_or_default())
    }
}
