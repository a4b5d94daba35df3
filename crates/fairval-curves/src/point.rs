//! Quoted curve points.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fairval_core::types::Date;

use crate::error::{CurveError, CurveResult};

/// One quoted market rate on a curve.
///
/// A point is positioned on the time axis by its `year_fraction` from the
/// curve date; the original tenor label or maturity date is kept for audit
/// visibility when available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Tenor label as quoted (e.g., "5Y"), if available.
    tenor: Option<String>,
    /// Absolute maturity date, if available.
    maturity: Option<Date>,
    /// Year fraction from the curve date. Always positive.
    year_fraction: Decimal,
    /// Quoted rate in decimal units (e.g., 0.045 for 4.5%).
    rate: Decimal,
}

impl CurvePoint {
    /// Creates a point from a year fraction and rate.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidPoint` if `year_fraction` is not positive.
    pub fn new(year_fraction: Decimal, rate: Decimal) -> CurveResult<Self> {
        if year_fraction <= Decimal::ZERO {
            return Err(CurveError::invalid_point(format!(
                "year fraction must be positive, got {year_fraction}"
            )));
        }
        Ok(Self {
            tenor: None,
            maturity: None,
            year_fraction,
            rate,
        })
    }

    /// Creates a point from an absolute maturity date.
    ///
    /// The year fraction is calendar days from `curve_date` divided by 365,
    /// matching the curve's own time axis.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidPoint` if `maturity` is not after
    /// `curve_date`.
    pub fn from_maturity(curve_date: Date, maturity: Date, rate: Decimal) -> CurveResult<Self> {
        let days = curve_date.days_between(&maturity);
        if days <= 0 {
            return Err(CurveError::invalid_point(format!(
                "maturity {maturity} is not after curve date {curve_date}"
            )));
        }
        Ok(Self {
            tenor: None,
            maturity: Some(maturity),
            year_fraction: Decimal::from(days) / Decimal::from(365),
            rate,
        })
    }

    /// Attaches the quoted tenor label.
    #[must_use]
    pub fn with_tenor(mut self, tenor: impl Into<String>) -> Self {
        self.tenor = Some(tenor.into());
        self
    }

    /// Returns the tenor label, if any.
    #[must_use]
    pub fn tenor(&self) -> Option<&str> {
        self.tenor.as_deref()
    }

    /// Returns the maturity date, if any.
    #[must_use]
    pub fn maturity(&self) -> Option<Date> {
        self.maturity
    }

    /// Returns the year fraction from the curve date.
    #[must_use]
    pub fn year_fraction(&self) -> Decimal {
        self.year_fraction
    }

    /// Returns the quoted rate.
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_point_creation() {
        let p = CurvePoint::new(dec!(5), dec!(0.045)).unwrap().with_tenor("5Y");
        assert_eq!(p.year_fraction(), dec!(5));
        assert_eq!(p.rate(), dec!(0.045));
        assert_eq!(p.tenor(), Some("5Y"));
    }

    #[test]
    fn test_rejects_non_positive_year_fraction() {
        assert!(CurvePoint::new(dec!(0), dec!(0.045)).is_err());
        assert!(CurvePoint::new(dec!(-1), dec!(0.045)).is_err());
    }

    #[test]
    fn test_from_maturity() {
        let curve_date = Date::from_ymd(2025, 1, 1).unwrap();
        let maturity = Date::from_ymd(2026, 1, 1).unwrap();
        let p = CurvePoint::from_maturity(curve_date, maturity, dec!(0.05)).unwrap();

        assert_eq!(p.year_fraction(), dec!(1));
        assert_eq!(p.maturity(), Some(maturity));
    }

    #[test]
    fn test_from_maturity_rejects_past() {
        let curve_date = Date::from_ymd(2025, 1, 1).unwrap();
        assert!(CurvePoint::from_maturity(curve_date, curve_date, dec!(0.05)).is_err());
    }
}
