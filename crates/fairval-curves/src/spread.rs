//! Discount specification: security-to-curve binding with z-spread.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fairval_core::types::Date;

use crate::curve::{continuous_df, Curve};
use crate::error::{CurveError, CurveResult};

/// Source of curve snapshots by name and market date.
///
/// Fallback policy (e.g., latest prior date when the exact date is missing)
/// belongs to the provider, not to the resolver.
pub trait CurveProvider {
    /// Returns the curve snapshot for a name and market date, if any.
    fn curve(&self, name: &str, curve_date: Date) -> Option<Curve>;
}

/// Binds a security to a base discount curve and a z-spread.
///
/// The z-spread is held in decimal rate units (e.g., `0.0085` for 85bps),
/// the same units as curve zero rates; basis-point conversion is the
/// caller's responsibility at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSpec {
    /// Security this spec applies to.
    security_id: String,
    /// Name of the base discount curve.
    base_curve_name: String,
    /// Constant spread added to every zero rate, in decimal rate units.
    z_spread: Decimal,
}

impl DiscountSpec {
    /// Creates a discount specification.
    #[must_use]
    pub fn new(
        security_id: impl Into<String>,
        base_curve_name: impl Into<String>,
        z_spread: Decimal,
    ) -> Self {
        Self {
            security_id: security_id.into(),
            base_curve_name: base_curve_name.into(),
            z_spread,
        }
    }

    /// Returns the security id.
    #[must_use]
    pub fn security_id(&self) -> &str {
        &self.security_id
    }

    /// Returns the base curve name.
    #[must_use]
    pub fn base_curve_name(&self) -> &str {
        &self.base_curve_name
    }

    /// Returns the z-spread in decimal rate units.
    #[must_use]
    pub fn z_spread(&self) -> Decimal {
        self.z_spread
    }

    /// Resolves the base curve through a provider.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::CurveNotFound` if no curve matches the base
    /// curve name and the requested date.
    pub fn resolve(&self, provider: &dyn CurveProvider, curve_date: Date) -> CurveResult<Curve> {
        provider
            .curve(&self.base_curve_name, curve_date)
            .ok_or_else(|| CurveError::not_found(&self.base_curve_name, curve_date))
    }

    /// Returns the spread-adjusted discount factor at a target date.
    ///
    /// `exp(-(zero_rate + z_spread) * t)`; exactly 1 at or before the curve
    /// date, where no time has elapsed for the spread to act on.
    #[must_use]
    pub fn effective_discount_factor(&self, curve: &Curve, target: Date) -> Decimal {
        if target <= curve.curve_date() {
            return Decimal::ONE;
        }

        let t = curve.year_fraction_to(target);
        continuous_df(curve.zero_rate(target) + self.z_spread, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveBuilder;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn flat_curve(rate: Decimal) -> Curve {
        CurveBuilder::new("USD_GOVT", d(2025, 1, 1))
            .add_point(dec!(1), rate)
            .add_point(dec!(10), rate)
            .build()
            .unwrap()
    }

    struct MapProvider(HashMap<(String, Date), Curve>);

    impl CurveProvider for MapProvider {
        fn curve(&self, name: &str, curve_date: Date) -> Option<Curve> {
            self.0.get(&(name.to_string(), curve_date)).cloned()
        }
    }

    #[test]
    fn test_resolve_found() {
        let curve = flat_curve(dec!(0.05));
        let mut curves = HashMap::new();
        curves.insert(("USD_GOVT".to_string(), d(2025, 1, 1)), curve);
        let provider = MapProvider(curves);

        let spec = DiscountSpec::new("SEC-1", "USD_GOVT", dec!(0.0085));
        assert!(spec.resolve(&provider, d(2025, 1, 1)).is_ok());
    }

    #[test]
    fn test_resolve_not_found() {
        let provider = MapProvider(HashMap::new());
        let spec = DiscountSpec::new("SEC-1", "USD_GOVT", dec!(0.0085));

        let err = spec.resolve(&provider, d(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, CurveError::CurveNotFound { .. }));
    }

    #[test]
    fn test_zero_spread_matches_curve() {
        let curve = flat_curve(dec!(0.05));
        let spec = DiscountSpec::new("SEC-1", "USD_GOVT", Decimal::ZERO);
        let target = d(2027, 1, 1);

        assert_eq!(
            spec.effective_discount_factor(&curve, target),
            curve.discount_factor(target)
        );
    }

    #[test]
    fn test_spread_reduces_discount_factor() {
        let curve = flat_curve(dec!(0.05));
        let target = d(2027, 1, 1);

        let tight = DiscountSpec::new("SEC-1", "USD_GOVT", dec!(0.0050));
        let wide = DiscountSpec::new("SEC-1", "USD_GOVT", dec!(0.0085));

        let df_tight = tight.effective_discount_factor(&curve, target);
        let df_wide = wide.effective_discount_factor(&curve, target);

        assert!(df_wide < df_tight);
        assert!(df_tight < curve.discount_factor(target));
    }

    #[test]
    fn test_spread_monotonicity() {
        let curve = flat_curve(dec!(0.04));
        let target = d(2026, 6, 1);

        let mut previous = Decimal::ONE;
        for bps in [0u32, 25, 50, 100, 200, 400] {
            let spread = Decimal::from(bps) / Decimal::from(10_000);
            let spec = DiscountSpec::new("SEC-1", "USD_GOVT", spread);
            let df = spec.effective_discount_factor(&curve, target);
            assert!(df < previous, "df must strictly decrease with spread");
            previous = df;
        }
    }

    #[test]
    fn test_df_at_curve_date_is_one() {
        let curve = flat_curve(dec!(0.05));
        let spec = DiscountSpec::new("SEC-1", "USD_GOVT", dec!(0.0085));
        assert_eq!(
            spec.effective_discount_factor(&curve, d(2025, 1, 1)),
            Decimal::ONE
        );
    }
}
