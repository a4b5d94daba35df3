//! # Fairval Engine
//!
//! Valuation run orchestrator for the Fairval cash-flow projection
//! engine.
//!
//! The engine ties the other crates together: it loads security terms and
//! discount specs from a [`ValuationStore`], projects cash flows, resolves
//! discount curves, discounts the future flows and persists a
//! [`PriceResult`] plus an append-only [`AuditEntry`] per security.
//!
//! Runs have an explicit lifecycle ([`RunStatus`]): submission registers a
//! pending [`ValuationRun`] and returns its [`RunId`]; execution is a
//! separate call, so callers own scheduling and retries.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fairval_engine::{MemoryStore, RunOptions, RunType, ValuationEngine};
//!
//! let store = Arc::new(MemoryStore::new());
//! // ... save terms, discount specs and curve snapshots ...
//! let engine = ValuationEngine::new(store);
//!
//! let run_id = engine
//!     .submit_valuation_run(
//!         RunType::Security,
//!         "SEC-1",
//!         valuation_date,
//!         RunOptions::default(),
//!     )
//!     .await?;
//! engine.execute_run(run_id).await?;
//!
//! for result in engine.get_run_results(run_id).await? {
//!     println!("{}: {}", result.security_id(), result.fair_value());
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod engine;
pub mod error;
pub mod memory;
pub mod pricing;
pub mod result;
pub mod run;
pub mod store;

pub use audit::AuditEntry;
pub use engine::ValuationEngine;
pub use error::{EngineError, EngineResult};
pub use memory::MemoryStore;
pub use pricing::present_value;
pub use result::{IfrsLevel, PriceResult};
pub use run::{RunId, RunOptions, RunStatus, RunType, ValuationRun};
pub use store::{StoreError, StoreResult, ValuationStore};
