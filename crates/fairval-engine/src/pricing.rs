//! Present-value calculation.

use rust_decimal::Decimal;

use fairval_curves::{Curve, DiscountSpec};
use fairval_instruments::ProjectedCashFlows;

/// Discounts the future unsettled flows of a projection.
///
/// Each flow on or after the projection's valuation date is discounted at
/// the spread-adjusted factor of its payment date; settled flows (paid or
/// defaulted) contribute nothing.
#[must_use]
pub fn present_value(flows: &ProjectedCashFlows, spec: &DiscountSpec, curve: &Curve) -> Decimal {
    flows
        .future()
        .map(|event| event.amount() * spec.effective_discount_factor(curve, event.date()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairval_core::types::{Currency, Date, Frequency};
    use fairval_curves::CurveBuilder;
    use fairval_instruments::{project, InstrumentKind, ProjectionOverrides, SecurityTerms};
    use rust_decimal_macros::dec;

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

    #[test]
    fn test_pv_below_undiscounted_sum() {
        let terms = SecurityTerms::new(
            "SEC-1",
            Currency::USD,
            dec!(100),
            d(2024, 1, 1),
            d(2027, 1, 1),
            Frequency::SemiAnnual,
            InstrumentKind::Fixed { coupon: dec!(0.04) },
        )
        .unwrap();
        let flows = project(&terms, d(2025, 1, 1), &ProjectionOverrides::default()).unwrap();
        let curve = flat_curve(dec!(0.05));
        let spec = DiscountSpec::new("SEC-1", "USD_GOVT", Decimal::ZERO);

        let pv = present_value(&flows, &spec, &curve);
        let undiscounted: Decimal = flows.future().map(|e| e.amount()).sum();
        assert!(pv > Decimal::ZERO);
        assert!(pv < undiscounted);
    }

    #[test]
    fn test_defaulted_flow_contributes_nothing() {
        let terms = SecurityTerms::new(
            "SEC-1",
            Currency::USD,
            dec!(100),
            d(2024, 1, 1),
            d(2027, 1, 1),
            Frequency::SemiAnnual,
            InstrumentKind::Fixed { coupon: dec!(0.04) },
        )
        .unwrap();
        let curve = flat_curve(dec!(0.05));
        let spec = DiscountSpec::new("SEC-1", "USD_GOVT", Decimal::ZERO);

        let mut flows = project(&terms, d(2025, 1, 1), &ProjectionOverrides::default()).unwrap();
        let baseline = present_value(&flows, &spec, &curve);

        flows.mark_defaulted(3).unwrap();
        assert!(present_value(&flows, &spec, &curve) < baseline);
    }

    #[test]
    fn test_wider_spread_lowers_pv() {
        let terms = SecurityTerms::new(
            "SEC-1",
            Currency::USD,
            dec!(100),
            d(2024, 1, 1),
            d(2027, 1, 1),
            Frequency::SemiAnnual,
            InstrumentKind::Fixed { coupon: dec!(0.04) },
        )
        .unwrap();
        let flows = project(&terms, d(2025, 1, 1), &ProjectionOverrides::default()).unwrap();
        let curve = flat_curve(dec!(0.05));

        let tight = DiscountSpec::new("SEC-1", "USD_GOVT", dec!(0.0050));
        let wide = DiscountSpec::new("SEC-1", "USD_GOVT", dec!(0.0085));
        assert!(
            present_value(&flows, &wide, &curve) < present_value(&flows, &tight, &curve)
        );
    }
}
