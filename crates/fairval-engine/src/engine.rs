//! Valuation run orchestrator.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{info, warn};

use fairval_core::types::Date;
use fairval_curves::{Curve, CurveProvider, DiscountSpec};
use fairval_instruments::{accrued_interest, project, ProjectedCashFlows, ProjectionOverrides};

use crate::audit::AuditEntry;
use crate::error::{EngineError, EngineResult};
use crate::pricing::present_value;
use crate::result::PriceResult;
use crate::run::{RunId, RunOptions, RunStatus, RunType, ValuationRun};
use crate::store::ValuationStore;

/// Adapts one loaded curve snapshot to the resolver interface.
struct SnapshotProvider {
    name: String,
    curve_date: Date,
    curve: Option<Curve>,
}

impl CurveProvider for SnapshotProvider {
    fn curve(&self, name: &str, curve_date: Date) -> Option<Curve> {
        if name == self.name && curve_date == self.curve_date {
            self.curve.clone()
        } else {
            None
        }
    }
}

/// Drives valuation runs end to end: projection, curve resolution,
/// discounting, result persistence and the audit trail.
///
/// Submission registers a pending run and returns its id; execution is a
/// separate call so scheduling stays with the caller (inline, spawned or
/// queued). A target security holds at most one pending or running run at
/// a time; the slot frees when the run reaches a terminal state.
///
/// # Example
///
/// ```rust,ignore
/// let engine = ValuationEngine::new(Arc::new(MemoryStore::new()));
/// let run_id = engine
///     .submit_valuation_run(RunType::Security, "SEC-1", valuation_date, options)
///     .await?;
/// engine.execute_run(run_id).await?;
/// let results = engine.get_run_results(run_id).await?;
/// ```
pub struct ValuationEngine {
    store: Arc<dyn ValuationStore>,
    active_targets: DashMap<String, RunId>,
}

impl ValuationEngine {
    /// Creates an engine over a storage backend.
    #[must_use]
    pub fn new(store: Arc<dyn ValuationStore>) -> Self {
        Self {
            store,
            active_targets: DashMap::new(),
        }
    }

    /// Returns the storage backend.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ValuationStore> {
        &self.store
    }

    /// Registers a pending run for a target and returns its id.
    ///
    /// # Errors
    ///
    /// - `UnsupportedRunType` for portfolio and fund runs (reserved)
    /// - `RunAlreadyInProgress` if the target already has an active run
    /// - `Persistence` if the run record cannot be stored
    pub async fn submit_valuation_run(
        &self,
        run_type: RunType,
        target_id: impl Into<String>,
        valuation_date: Date,
        options: RunOptions,
    ) -> EngineResult<RunId> {
        if run_type != RunType::Security {
            return Err(EngineError::UnsupportedRunType {
                value: run_type.to_string(),
            });
        }

        let target_id = target_id.into();
        let run = ValuationRun::new(run_type, target_id.clone(), valuation_date, options);
        let run_id = run.id();

        // One active run per target; the slot is claimed before the run is
        // persisted and released on terminal states
        match self.active_targets.entry(target_id.clone()) {
            Entry::Occupied(entry) => {
                return Err(EngineError::RunAlreadyInProgress {
                    target_id,
                    run_id: *entry.get(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(run_id);
            }
        }

        if let Err(err) = self.store.save_run(&run).await {
            self.active_targets.remove(&target_id);
            return Err(err.into());
        }

        info!(
            %run_id,
            target_id = %target_id,
            valuation_date = %valuation_date,
            "Valuation run submitted"
        );
        Ok(run_id)
    }

    /// Executes a pending run to completion.
    ///
    /// Any failure marks the run failed with its message and releases the
    /// target slot; a failed run is terminal and must be re-submitted.
    ///
    /// # Errors
    ///
    /// - `UnknownRun` if the run id is not stored
    /// - `RunNotPending` if the run already left the pending state
    /// - valuation errors, after marking the run failed
    pub async fn execute_run(&self, run_id: RunId) -> EngineResult<()> {
        let mut run = self
            .store
            .load_run(run_id)
            .await?
            .ok_or(EngineError::UnknownRun { run_id })?;

        if run.status() != RunStatus::Pending {
            return Err(EngineError::RunNotPending {
                run_id,
                status: run.status(),
            });
        }

        run.start();
        self.store.save_run(&run).await?;
        info!(%run_id, target_id = %run.target_id(), "Valuation run started");

        let target_id = run.target_id().to_string();
        let outcome = self.value_security(&run, &target_id).await;
        // The slot releases on every terminal path, even when the terminal
        // save fails; a target must never be left without a recovery path
        match outcome {
            Ok(result) => {
                run.record_completed(1);
                run.complete();
                let saved = self.store.save_run(&run).await;
                self.active_targets.remove(&target_id);
                if let Err(save_err) = saved {
                    warn!(%run_id, error = %save_err, "Failed to persist completed run");
                    run.fail(save_err.to_string());
                    let _ = self.store.save_run(&run).await;
                    return Err(save_err.into());
                }
                info!(
                    %run_id,
                    fair_value = %result.fair_value(),
                    "Valuation run completed"
                );
                Ok(())
            }
            Err(err) => {
                warn!(%run_id, target_id = %target_id, error = %err, "Valuation run failed");
                run.fail(err.to_string());
                if let Err(save_err) = self.store.save_run(&run).await {
                    warn!(%run_id, error = %save_err, "Failed to persist failed run");
                }
                self.active_targets.remove(&target_id);
                Err(err)
            }
        }
    }

    async fn value_security(
        &self,
        run: &ValuationRun,
        security_id: &str,
    ) -> EngineResult<PriceResult> {
        let terms = self
            .store
            .load_terms(security_id)
            .await?
            .ok_or_else(|| EngineError::UnknownSecurity {
                security_id: security_id.to_string(),
            })?;

        let options = run.options();
        let valuation_date = run.valuation_date();
        let flows = project(&terms, valuation_date, &options.overrides)?;
        let accrued = accrued_interest(&terms, valuation_date, &options.overrides)?;

        let mut spec = self
            .store
            .load_discount_spec(security_id)
            .await?
            .ok_or_else(|| EngineError::MissingDiscountSpec {
                security_id: security_id.to_string(),
            })?;
        if let Some(curve_name) = &options.base_curve_name {
            spec = DiscountSpec::new(security_id, curve_name.clone(), spec.z_spread());
        }

        let curve = self.resolve_curve(&spec, run.curve_date()).await?;
        let pv = present_value(&flows, &spec, &curve);

        let result = PriceResult::new(
            run.id(),
            security_id,
            valuation_date,
            pv,
            accrued,
            options.reporting_currency.unwrap_or(terms.currency()),
        );
        self.store.save_price_result(&result).await?;

        let entry = AuditEntry::record(
            run.id(),
            security_id,
            valuation_date,
            curve.name(),
            curve.curve_date(),
            spec.z_spread(),
            pv,
            accrued,
        );
        self.store.append_audit(&entry).await?;

        Ok(result)
    }

    async fn resolve_curve(&self, spec: &DiscountSpec, curve_date: Date) -> EngineResult<Curve> {
        let provider = SnapshotProvider {
            name: spec.base_curve_name().to_string(),
            curve_date,
            curve: self
                .store
                .load_curve(spec.base_curve_name(), curve_date)
                .await?,
        };
        Ok(spec.resolve(&provider, curve_date)?)
    }

    /// Returns the lifecycle state of a run.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRun` if the run id is not stored.
    pub async fn get_run_status(&self, run_id: RunId) -> EngineResult<RunStatus> {
        Ok(self.get_run(run_id).await?.status())
    }

    /// Returns the full run record.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRun` if the run id is not stored.
    pub async fn get_run(&self, run_id: RunId) -> EngineResult<ValuationRun> {
        self.store
            .load_run(run_id)
            .await?
            .ok_or(EngineError::UnknownRun { run_id })
    }

    /// Returns all price results of a run, ordered by security id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRun` if the run id is not stored.
    pub async fn get_run_results(&self, run_id: RunId) -> EngineResult<Vec<PriceResult>> {
        self.get_run(run_id).await?;
        Ok(self.store.load_price_results(run_id).await?)
    }

    /// Returns the audit trail of a run in append order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRun` if the run id is not stored.
    pub async fn get_audit_trail(&self, run_id: RunId) -> EngineResult<Vec<AuditEntry>> {
        self.get_run(run_id).await?;
        Ok(self.store.load_audit(run_id).await?)
    }

    /// Projects the cash flows of a stored security without running a
    /// valuation.
    ///
    /// # Errors
    ///
    /// - `UnknownSecurity` if no terms are stored for the id
    /// - `Projection` on projection failures
    pub async fn project_cashflows(
        &self,
        security_id: &str,
        as_of: Date,
        overrides: &ProjectionOverrides,
    ) -> EngineResult<ProjectedCashFlows> {
        let terms = self
            .store
            .load_terms(security_id)
            .await?
            .ok_or_else(|| EngineError::UnknownSecurity {
                security_id: security_id.to_string(),
            })?;
        Ok(project(&terms, as_of, overrides)?)
    }
}
