//! Scheduled cash-flow events.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Currency, Date};

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowType {
    /// Regular coupon payment
    Coupon,
    /// Principal repayment (maturity or call redemption)
    Principal,
    /// Floating-rate coupon fixed at a reset date
    Reset,
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowType::Coupon => "Coupon",
            FlowType::Principal => "Principal",
            FlowType::Reset => "Reset",
        };
        write!(f, "{name}")
    }
}

/// Settlement status of a scheduled cash flow.
///
/// Transitions are one-way: `Scheduled -> Paid` or `Scheduled -> Defaulted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FlowStatus {
    /// Payment is scheduled but has not settled.
    #[default]
    Scheduled,
    /// Payment was made.
    Paid,
    /// Payment defaulted (zero expected recovery).
    Defaulted,
}

impl FlowStatus {
    /// Returns true if the flow has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowStatus::Paid | FlowStatus::Defaulted)
    }
}

/// One scheduled payment on an instrument.
///
/// Events carry a deterministic `sequence` ordinal assigned at projection
/// time, so identical projections produce identical event identities.
///
/// # Example
///
/// ```rust
/// use fairval_core::types::{CashFlowEvent, Currency, Date, FlowType};
/// use rust_decimal::Decimal;
///
/// let cf = CashFlowEvent::new(
///     0,
///     Date::from_ymd(2025, 6, 15).unwrap(),
///     FlowType::Coupon,
///     Decimal::from(2),
///     Currency::USD,
/// );
/// assert!(cf.is_coupon());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowEvent {
    /// Ordinal within the projected schedule.
    sequence: u32,
    /// Payment date.
    date: Date,
    /// Type of cash flow.
    flow_type: FlowType,
    /// Payment amount in the instrument's currency.
    amount: Decimal,
    /// Payment currency.
    currency: Currency,
    /// Settlement status.
    status: FlowStatus,
}

impl CashFlowEvent {
    /// Creates a new scheduled cash-flow event.
    #[must_use]
    pub fn new(
        sequence: u32,
        date: Date,
        flow_type: FlowType,
        amount: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            sequence,
            date,
            flow_type,
            amount,
            currency,
            status: FlowStatus::Scheduled,
        }
    }

    /// Returns the ordinal within the schedule.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the type of cash flow.
    #[must_use]
    pub fn flow_type(&self) -> FlowType {
        self.flow_type
    }

    /// Returns the payment amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the payment currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the settlement status.
    #[must_use]
    pub fn status(&self) -> FlowStatus {
        self.status
    }

    /// Returns true if this is a coupon payment (fixed or floating).
    #[must_use]
    pub fn is_coupon(&self) -> bool {
        matches!(self.flow_type, FlowType::Coupon | FlowType::Reset)
    }

    /// Returns true if this is a principal repayment.
    #[must_use]
    pub fn is_principal(&self) -> bool {
        matches!(self.flow_type, FlowType::Principal)
    }

    /// Attempts to move the event to a terminal status.
    ///
    /// Returns false (leaving the event untouched) if the event has already
    /// settled; the transition is one-way.
    pub fn settle(&mut self, status: FlowStatus) -> bool {
        if self.status.is_terminal() || !status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }
}

impl fmt::Display for CashFlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} ({})",
            self.date, self.amount, self.currency, self.flow_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn event() -> CashFlowEvent {
        CashFlowEvent::new(
            0,
            Date::from_ymd(2025, 6, 15).unwrap(),
            FlowType::Coupon,
            dec!(2.50),
            Currency::USD,
        )
    }

    #[test]
    fn test_event_creation() {
        let cf = event();
        assert_eq!(cf.amount(), dec!(2.50));
        assert_eq!(cf.status(), FlowStatus::Scheduled);
        assert!(cf.is_coupon());
        assert!(!cf.is_principal());
    }

    #[test]
    fn test_settle_one_way() {
        let mut cf = event();
        assert!(cf.settle(FlowStatus::Paid));
        assert_eq!(cf.status(), FlowStatus::Paid);

        // Terminal states cannot transition again
        assert!(!cf.settle(FlowStatus::Defaulted));
        assert_eq!(cf.status(), FlowStatus::Paid);
    }

    #[test]
    fn test_settle_rejects_scheduled_target() {
        let mut cf = event();
        assert!(!cf.settle(FlowStatus::Scheduled));
        assert_eq!(cf.status(), FlowStatus::Scheduled);
    }

    #[test]
    fn test_serde_round_trip() {
        let cf = event();
        let json = serde_json::to_string(&cf).unwrap();
        let back: CashFlowEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(cf, back);
    }

    #[test]
    fn test_reset_is_coupon() {
        let mut cf = event();
        cf = CashFlowEvent::new(1, cf.date(), FlowType::Reset, cf.amount(), Currency::USD);
        assert!(cf.is_coupon());
    }
}
