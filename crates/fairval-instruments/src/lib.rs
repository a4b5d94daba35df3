//! # Fairval Instruments
//!
//! Security terms and cash-flow projection engines for the Fairval
//! valuation engine.
//!
//! Instrument families are a closed tagged variant ([`InstrumentKind`])
//! carried by [`SecurityTerms`]; projection is a single [`project`]
//! operation pattern-matched per variant. Adding an instrument type is a
//! new variant plus a match arm.
//!
//! ## Example
//!
//! ```rust
//! use fairval_core::types::{Currency, Date, Frequency};
//! use fairval_instruments::{project, InstrumentKind, ProjectionOverrides, SecurityTerms};
//! use rust_decimal_macros::dec;
//!
//! let terms = SecurityTerms::new(
//!     "SEC-1",
//!     Currency::USD,
//!     dec!(100),
//!     Date::from_ymd(2023, 1, 1).unwrap(),
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     Frequency::SemiAnnual,
//!     InstrumentKind::Fixed { coupon: dec!(0.04) },
//! ).unwrap();
//!
//! let flows = project(
//!     &terms,
//!     Date::from_ymd(2023, 1, 1).unwrap(),
//!     &ProjectionOverrides::default(),
//! ).unwrap();
//! assert_eq!(flows.len(), 5); // four coupons plus principal
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod accrual;
pub mod error;
pub mod overrides;
pub mod project;
pub mod schedule;
pub mod terms;

pub use accrual::accrued_interest;
pub use error::{ProjectionError, ProjectionResult};
pub use overrides::ProjectionOverrides;
pub use project::{project, ProjectedCashFlows};
pub use schedule::generate_schedule;
pub use terms::{CallEntry, InstrumentKind, InstrumentType, SecurityTerms, StepEntry};
