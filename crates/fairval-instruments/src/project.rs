//! Cash-flow projection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fairval_core::types::{CashFlowEvent, Date, FlowStatus, FlowType};

use crate::error::{ProjectionError, ProjectionResult};
use crate::overrides::ProjectionOverrides;
use crate::schedule::{accrual_periods, generate_schedule};
use crate::terms::{InstrumentKind, SecurityTerms};

/// How the projected schedule terminates.
enum Redemption {
    /// Contractual redemption at face (or its family-specific equivalent).
    Maturity,
    /// Early redemption at a call price per 100 of face.
    Call { price: Decimal },
}

/// Result of projecting one instrument: the full event schedule plus the
/// valuation date it was projected against.
///
/// Event identities are deterministic sequence ordinals, so projecting the
/// same terms twice yields the same events. Settlement is one-way; settled
/// events keep their slot in the schedule so the record stays complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedCashFlows {
    security_id: String,
    as_of: Date,
    events: Vec<CashFlowEvent>,
}

impl ProjectedCashFlows {
    /// Returns the security id the projection belongs to.
    #[must_use]
    pub fn security_id(&self) -> &str {
        &self.security_id
    }

    /// Returns the valuation date of the projection.
    #[must_use]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Returns all projected events in payment order.
    #[must_use]
    pub fn events(&self) -> &[CashFlowEvent] {
        &self.events
    }

    /// Returns the number of projected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events were projected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over events on or after the valuation date that have not
    /// settled. These are the flows a present-value calculation discounts.
    pub fn future(&self) -> impl Iterator<Item = &CashFlowEvent> {
        self.events
            .iter()
            .filter(move |e| e.date() >= self.as_of && e.status() == FlowStatus::Scheduled)
    }

    /// Marks the event with the given sequence as paid.
    ///
    /// # Errors
    ///
    /// - `UnknownEvent` if no event has the sequence
    /// - `InvalidStatusTransition` if the event already settled
    pub fn mark_paid(&mut self, sequence: u32) -> ProjectionResult<()> {
        self.settle(sequence, FlowStatus::Paid)
    }

    /// Marks the event with the given sequence as defaulted.
    ///
    /// The event stays in the schedule with a zero expected recovery.
    ///
    /// # Errors
    ///
    /// - `UnknownEvent` if no event has the sequence
    /// - `InvalidStatusTransition` if the event already settled
    pub fn mark_defaulted(&mut self, sequence: u32) -> ProjectionResult<()> {
        self.settle(sequence, FlowStatus::Defaulted)
    }

    fn settle(&mut self, sequence: u32, status: FlowStatus) -> ProjectionResult<()> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.sequence() == sequence)
            .ok_or(ProjectionError::UnknownEvent { sequence })?;

        if !event.settle(status) {
            return Err(ProjectionError::InvalidStatusTransition { sequence });
        }
        Ok(())
    }

    /// Consumes the projection, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<CashFlowEvent> {
        self.events
    }
}

/// Projects the full cash-flow schedule for an instrument.
///
/// Dispatches on the instrument family. Coupon amounts are
/// `base * rate * year_fraction(period)` under the instrument's day-count
/// convention; the redemption at the final date is emitted as a separate
/// `Principal` event. Projection is pure: the same terms, valuation date
/// and overrides always produce the same events.
///
/// # Errors
///
/// - `InvalidScheduleWindow` from schedule generation
/// - `InvalidTerms` when `call_exercised` does not match a call entry, or
///   is set on a zero-coupon instrument
/// - `Core` for date arithmetic failures
pub fn project(
    terms: &SecurityTerms,
    as_of: Date,
    overrides: &ProjectionOverrides,
) -> ProjectionResult<ProjectedCashFlows> {
    let events = match terms.kind() {
        InstrumentKind::Zero => {
            if overrides.call_exercised.is_some() {
                return Err(ProjectionError::invalid_terms(
                    "zero-coupon instrument cannot be called",
                ));
            }
            vec![CashFlowEvent::new(
                0,
                terms.maturity_date(),
                FlowType::Principal,
                terms.face_value(),
                terms.currency(),
            )]
        }
        _ => project_coupon_bearing(terms, overrides)?,
    };

    Ok(ProjectedCashFlows {
        security_id: terms.security_id().to_string(),
        as_of,
        events,
    })
}

fn project_coupon_bearing(
    terms: &SecurityTerms,
    overrides: &ProjectionOverrides,
) -> ProjectionResult<Vec<CashFlowEvent>> {
    let schedule = generate_schedule(
        terms.issue_date(),
        terms.maturity_date(),
        terms.frequency(),
        terms.first_coupon_date(),
    )?;
    let (schedule, redemption) = apply_call(terms, overrides, schedule)?;

    let day_count = terms.day_count();
    let ratio = index_ratio(terms, overrides);
    let base = accrual_base(terms);
    let coupon_flow_type = match terms.kind() {
        InstrumentKind::Floating { .. } => FlowType::Reset,
        _ => FlowType::Coupon,
    };

    let mut events = Vec::with_capacity(schedule.len() + 1);
    let mut sequence = 0;

    for (start, end) in accrual_periods(terms.issue_date(), &schedule) {
        let rate = period_rate(terms, start, overrides);
        let amount = base * rate * day_count.year_fraction(start, end) * ratio;
        events.push(CashFlowEvent::new(
            sequence,
            end,
            coupon_flow_type,
            amount,
            terms.currency(),
        ));
        sequence += 1;
    }

    let redemption_date = *schedule.last().unwrap_or(&terms.maturity_date());
    let redemption_amount = match redemption {
        Redemption::Maturity => match terms.kind() {
            InstrumentKind::TermLoan { outstanding, .. } => *outstanding,
            InstrumentKind::InflationLinked { .. } => terms.face_value() * ratio,
            _ => terms.face_value(),
        },
        Redemption::Call { price } => terms.face_value() * price / Decimal::from(100),
    };
    events.push(CashFlowEvent::new(
        sequence,
        redemption_date,
        FlowType::Principal,
        redemption_amount,
        terms.currency(),
    ));

    Ok(events)
}

/// Truncates the schedule at an exercised call date.
///
/// Payment dates strictly before the call date survive; the call date
/// itself closes the final (possibly short) accrual period and carries the
/// call redemption.
fn apply_call(
    terms: &SecurityTerms,
    overrides: &ProjectionOverrides,
    schedule: Vec<Date>,
) -> ProjectionResult<(Vec<Date>, Redemption)> {
    let Some(call_date) = overrides.call_exercised else {
        return Ok((schedule, Redemption::Maturity));
    };

    let entry = terms
        .call_schedule()
        .iter()
        .find(|e| e.call_date == call_date)
        .ok_or_else(|| {
            ProjectionError::invalid_terms(format!("no call entry on {call_date}"))
        })?;

    if call_date >= terms.maturity_date() {
        return Ok((schedule, Redemption::Maturity));
    }

    let mut truncated: Vec<Date> = schedule.into_iter().filter(|&d| d < call_date).collect();
    truncated.push(call_date);
    Ok((
        truncated,
        Redemption::Call {
            price: entry.call_price,
        },
    ))
}

/// Annual coupon rate applying to the period starting at `period_start`.
///
/// Floating coupons fix at the period start: a recorded fixing wins,
/// otherwise the current reference-rate snapshot is held flat, and the
/// floor binds after the spread is added. Step-up coupons use the latest
/// step effective on or before the period start.
pub(crate) fn period_rate(
    terms: &SecurityTerms,
    period_start: Date,
    overrides: &ProjectionOverrides,
) -> Decimal {
    match terms.kind() {
        InstrumentKind::Zero => Decimal::ZERO,
        InstrumentKind::Fixed { coupon }
        | InstrumentKind::InflationLinked { coupon, .. }
        | InstrumentKind::TermLoan { coupon, .. } => *coupon,
        InstrumentKind::Floating {
            reference_rate,
            spread,
            floor,
        } => {
            let fixing = overrides
                .fixings
                .get(&period_start)
                .copied()
                .unwrap_or(*reference_rate);
            let rate = fixing + spread;
            match floor {
                Some(f) => rate.max(*f),
                None => rate,
            }
        }
        InstrumentKind::StepUp { base_coupon, steps } => steps
            .iter()
            .filter(|s| s.effective_date <= period_start)
            .next_back()
            .map_or(*base_coupon, |s| s.new_coupon),
    }
}

/// Principal amount interest accrues on.
pub(crate) fn accrual_base(terms: &SecurityTerms) -> Decimal {
    match terms.kind() {
        InstrumentKind::TermLoan { outstanding, .. } => *outstanding,
        _ => terms.face_value(),
    }
}

/// Inflation index ratio, 1 for every other family or when no index level
/// was supplied.
pub(crate) fn index_ratio(terms: &SecurityTerms, overrides: &ProjectionOverrides) -> Decimal {
    match (terms.kind(), overrides.index_level) {
        (InstrumentKind::InflationLinked { base_index, .. }, Some(level)) => level / base_index,
        _ => Decimal::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairval_core::types::{Currency, Frequency};
    use rust_decimal_macros::dec;

    use crate::terms::{CallEntry, StepEntry};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn fixed_terms() -> SecurityTerms {
        SecurityTerms::new(
            "SEC-1",
            Currency::USD,
            dec!(100),
            d(2023, 1, 1),
            d(2025, 1, 1),
            Frequency::SemiAnnual,
            InstrumentKind::Fixed { coupon: dec!(0.04) },
        )
        .unwrap()
    }

    fn no_overrides() -> ProjectionOverrides {
        ProjectionOverrides::default()
    }

    #[test]
    fn test_fixed_bond_projection() {
        let flows = project(&fixed_terms(), d(2023, 1, 1), &no_overrides()).unwrap();

        // Four semiannual coupons plus the principal at maturity
        assert_eq!(flows.len(), 5);
        let coupons: Vec<_> = flows.events().iter().filter(|e| e.is_coupon()).collect();
        assert_eq!(coupons.len(), 4);

        // 30/360 semiannual periods are exactly half a year
        for coupon in &coupons {
            assert_eq!(coupon.amount(), dec!(2.00));
        }

        let principal = flows.events().last().unwrap();
        assert!(principal.is_principal());
        assert_eq!(principal.amount(), dec!(100));
        assert_eq!(principal.date(), d(2025, 1, 1));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let terms = fixed_terms();
        let a = project(&terms, d(2023, 6, 1), &no_overrides()).unwrap();
        let b = project(&terms, d(2023, 6, 1), &no_overrides()).unwrap();
        assert_eq!(a, b);

        let sequences: Vec<u32> = a.events().iter().map(|e| e.sequence()).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_coupon_single_event() {
        let terms = SecurityTerms::new(
            "ZERO-1",
            Currency::USD,
            dec!(100),
            d(2020, 1, 15),
            d(2030, 1, 15),
            Frequency::Zero,
            InstrumentKind::Zero,
        )
        .unwrap();

        let flows = project(&terms, d(2024, 1, 1), &no_overrides()).unwrap();
        assert_eq!(flows.len(), 1);
        let event = &flows.events()[0];
        assert!(event.is_principal());
        assert_eq!(event.amount(), dec!(100));
        assert_eq!(event.date(), d(2030, 1, 15));
    }

    #[test]
    fn test_zero_coupon_rejects_call_exercise() {
        let terms = SecurityTerms::new(
            "ZERO-1",
            Currency::USD,
            dec!(100),
            d(2020, 1, 15),
            d(2030, 1, 15),
            Frequency::Zero,
            InstrumentKind::Zero,
        )
        .unwrap();

        let overrides = ProjectionOverrides::new().with_call_exercised(d(2025, 1, 15));
        let result = project(&terms, d(2024, 1, 1), &overrides);
        assert!(matches!(result, Err(ProjectionError::InvalidTerms { .. })));
    }

    #[test]
    fn test_call_truncation() {
        let terms = fixed_terms()
            .with_call_schedule(vec![CallEntry {
                call_date: d(2024, 1, 1),
                call_price: dec!(101),
            }])
            .unwrap();
        let overrides = ProjectionOverrides::new().with_call_exercised(d(2024, 1, 1));

        let flows = project(&terms, d(2023, 1, 1), &overrides).unwrap();

        // Coupons at 2023-07-01 and at the call date, then the call amount
        assert_eq!(flows.len(), 3);
        assert_eq!(flows.events()[0].date(), d(2023, 7, 1));
        assert_eq!(flows.events()[1].date(), d(2024, 1, 1));
        assert!(flows.events()[1].is_coupon());

        let redemption = flows.events().last().unwrap();
        assert!(redemption.is_principal());
        assert_eq!(redemption.date(), d(2024, 1, 1));
        assert_eq!(redemption.amount(), dec!(101));
    }

    #[test]
    fn test_call_exercise_without_entry_fails() {
        let terms = fixed_terms()
            .with_call_schedule(vec![CallEntry {
                call_date: d(2024, 1, 1),
                call_price: dec!(101),
            }])
            .unwrap();
        let overrides = ProjectionOverrides::new().with_call_exercised(d(2024, 4, 1));

        let result = project(&terms, d(2023, 1, 1), &overrides);
        assert!(matches!(result, Err(ProjectionError::InvalidTerms { .. })));
    }

    #[test]
    fn test_floating_fixing_and_floor() {
        let terms = SecurityTerms::new(
            "FRN-1",
            Currency::USD,
            dec!(100),
            d(2023, 1, 1),
            d(2024, 1, 1),
            Frequency::SemiAnnual,
            InstrumentKind::Floating {
                reference_rate: dec!(0.03),
                spread: dec!(0.01),
                floor: Some(dec!(0.02)),
            },
        )
        .unwrap();

        // Fixing at the first reset drives the rate below the floor
        let overrides = ProjectionOverrides::new().with_fixing(d(2023, 1, 1), dec!(0.005));
        let flows = project(&terms, d(2023, 1, 1), &overrides).unwrap();

        let coupons: Vec<_> = flows.events().iter().filter(|e| e.is_coupon()).collect();
        assert_eq!(coupons.len(), 2);
        assert_eq!(coupons[0].flow_type(), FlowType::Reset);

        // First period: 0.005 + 0.01 = 0.015, floored at 0.02
        assert_eq!(coupons[0].amount(), dec!(1.00));
        // Second period: no fixing, snapshot 0.03 + 0.01 = 0.04
        assert_eq!(coupons[1].amount(), dec!(2.00));
    }

    #[test]
    fn test_step_up_boundaries() {
        let terms = SecurityTerms::new(
            "STEP-1",
            Currency::USD,
            dec!(100),
            d(2023, 1, 1),
            d(2026, 1, 1),
            Frequency::Annual,
            InstrumentKind::StepUp {
                base_coupon: dec!(0.03),
                steps: vec![StepEntry {
                    effective_date: d(2024, 1, 1),
                    new_coupon: dec!(0.05),
                }],
            },
        )
        .unwrap();

        let flows = project(&terms, d(2023, 1, 1), &no_overrides()).unwrap();
        let coupons: Vec<_> = flows.events().iter().filter(|e| e.is_coupon()).collect();
        assert_eq!(coupons.len(), 3);

        // First period starts before the step, later periods on/after it
        assert_eq!(coupons[0].amount(), dec!(3.00));
        assert_eq!(coupons[1].amount(), dec!(5.00));
        assert_eq!(coupons[2].amount(), dec!(5.00));
    }

    #[test]
    fn test_inflation_linked_scaling() {
        let terms = SecurityTerms::new(
            "LINKER-1",
            Currency::USD,
            dec!(100),
            d(2023, 1, 1),
            d(2024, 1, 1),
            Frequency::Annual,
            InstrumentKind::InflationLinked {
                coupon: dec!(0.02),
                base_index: dec!(100),
            },
        )
        .unwrap();

        let overrides = ProjectionOverrides::new().with_index_level(dec!(110));
        let flows = project(&terms, d(2023, 1, 1), &overrides).unwrap();

        // Coupon and principal both scale by the 1.1 index ratio
        assert_eq!(flows.events()[0].amount(), dec!(2.20));
        assert_eq!(flows.events()[1].amount(), dec!(110.0));
    }

    #[test]
    fn test_term_loan_accrues_on_outstanding() {
        let terms = SecurityTerms::new(
            "LOAN-1",
            Currency::USD,
            dec!(100),
            d(2024, 1, 1),
            d(2024, 7, 1),
            Frequency::SemiAnnual,
            InstrumentKind::TermLoan {
                coupon: dec!(0.06),
                outstanding: dec!(50),
            },
        )
        .unwrap();

        let flows = project(&terms, d(2024, 1, 1), &no_overrides()).unwrap();
        assert_eq!(flows.len(), 2);

        // ACT/360 over 182 days on the outstanding 50
        let expected = dec!(50) * dec!(0.06) * Decimal::from(182) / Decimal::from(360);
        assert_eq!(flows.events()[0].amount(), expected);
        assert_eq!(flows.events()[1].amount(), dec!(50));
    }

    #[test]
    fn test_future_excludes_past_and_settled() {
        let terms = fixed_terms();
        let mut flows = project(&terms, d(2024, 1, 1), &no_overrides()).unwrap();

        // Events 0 (2023-07-01) is past; default event 2 (2024-07-01)
        flows.mark_defaulted(2).unwrap();

        let future: Vec<u32> = flows.future().map(|e| e.sequence()).collect();
        assert_eq!(future, vec![1, 3, 4]);
    }

    #[test]
    fn test_mark_paid_and_transition_rules() {
        let terms = fixed_terms();
        let mut flows = project(&terms, d(2023, 1, 1), &no_overrides()).unwrap();

        flows.mark_paid(0).unwrap();
        assert_eq!(flows.events()[0].status(), FlowStatus::Paid);

        // Settled events stay in the schedule but cannot settle again
        assert_eq!(flows.len(), 5);
        assert!(matches!(
            flows.mark_defaulted(0),
            Err(ProjectionError::InvalidStatusTransition { sequence: 0 })
        ));

        assert!(matches!(
            flows.mark_paid(99),
            Err(ProjectionError::UnknownEvent { sequence: 99 })
        ));
    }
}
