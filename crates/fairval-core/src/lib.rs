//! # Fairval Core
//!
//! Core types and day-count conventions for the Fairval valuation engine.
//!
//! This crate provides the foundational building blocks used throughout
//! Fairval:
//!
//! - **Types**: Domain-specific types like [`Date`], [`Currency`],
//!   [`Frequency`], and [`CashFlowEvent`]
//! - **Day Count Conventions**: Year-fraction calculations for interest
//!   accrual ([`daycounts::DayCountConvention`])
//!
//! ## Example
//!
//! ```rust
//! use fairval_core::daycounts::DayCountConvention;
//! use fairval_core::types::Date;
//!
//! let dc: DayCountConvention = "ACT/360".parse().unwrap();
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 7, 1).unwrap();
//! let yf = dc.year_fraction(start, end);
//! assert!(yf > rust_decimal::Decimal::ZERO);
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod daycounts;
pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{CashFlowEvent, Currency, Date, FlowStatus, FlowType, Frequency};
