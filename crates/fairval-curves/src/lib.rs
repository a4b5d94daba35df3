//! # Fairval Curves
//!
//! Discount curve model for the Fairval valuation engine.
//!
//! A [`Curve`] is an immutable snapshot of quoted market rates. Zero rates
//! are linearly interpolated between quoted points and held flat outside the
//! quoted range; discount factors use continuous compounding so that z-spread
//! addition composes linearly in rate space.
//!
//! [`DiscountSpec`] binds a security to a base curve plus a z-spread and
//! produces spread-adjusted discount factors.
//!
//! ## Example
//!
//! ```rust
//! use fairval_core::types::Date;
//! use fairval_curves::{Curve, CurveBuilder};
//! use rust_decimal_macros::dec;
//!
//! let curve_date = Date::from_ymd(2025, 1, 15).unwrap();
//! let curve = CurveBuilder::new("USD_GOVT", curve_date)
//!     .add_point(dec!(1), dec!(0.045))
//!     .add_point(dec!(5), dec!(0.048))
//!     .build()
//!     .unwrap();
//!
//! let df = curve.discount_factor(curve_date);
//! assert_eq!(df, rust_decimal::Decimal::ONE);
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod curve;
pub mod error;
pub mod point;
pub mod spread;

pub use curve::{Curve, CurveBuilder, CurveType};
pub use error::{CurveError, CurveResult};
pub use point::CurvePoint;
pub use spread::{CurveProvider, DiscountSpec};
