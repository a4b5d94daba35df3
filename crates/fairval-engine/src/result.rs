//! Per-security valuation results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use fairval_core::types::{Currency, Date};

use crate::run::RunId;

/// IFRS 13 fair-value hierarchy level.
///
/// Model valuations against observable curve inputs are Level 2; Level 1
/// (quoted prices) and Level 3 (unobservable inputs) are carried for
/// completeness of the reporting schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IfrsLevel {
    /// Quoted prices in active markets.
    Level1,
    /// Observable inputs other than quoted prices.
    #[default]
    Level2,
    /// Unobservable inputs.
    Level3,
}

impl fmt::Display for IfrsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IfrsLevel::Level1 => "Level 1",
            IfrsLevel::Level2 => "Level 2",
            IfrsLevel::Level3 => "Level 3",
        };
        write!(f, "{name}")
    }
}

/// Valuation output for one security in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResult {
    result_id: Uuid,
    run_id: RunId,
    security_id: String,
    valuation_date: Date,
    present_value: Decimal,
    accrued_interest: Decimal,
    fair_value: Decimal,
    currency: Currency,
    ifrs_level: IfrsLevel,
}

impl PriceResult {
    /// Assembles a result; fair value is present value plus accrued.
    #[must_use]
    pub fn new(
        run_id: RunId,
        security_id: impl Into<String>,
        valuation_date: Date,
        present_value: Decimal,
        accrued_interest: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            result_id: Uuid::new_v4(),
            run_id,
            security_id: security_id.into(),
            valuation_date,
            present_value,
            accrued_interest,
            fair_value: present_value + accrued_interest,
            currency,
            ifrs_level: IfrsLevel::default(),
        }
    }

    /// Returns the result id.
    #[must_use]
    pub fn result_id(&self) -> Uuid {
        self.result_id
    }

    /// Returns the run this result belongs to.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns the security id.
    #[must_use]
    pub fn security_id(&self) -> &str {
        &self.security_id
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the discounted value of future cash flows.
    #[must_use]
    pub fn present_value(&self) -> Decimal {
        self.present_value
    }

    /// Returns interest accrued since the last coupon date.
    #[must_use]
    pub fn accrued_interest(&self) -> Decimal {
        self.accrued_interest
    }

    /// Returns present value plus accrued interest.
    #[must_use]
    pub fn fair_value(&self) -> Decimal {
        self.fair_value
    }

    /// Returns the reporting currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the fair-value hierarchy classification.
    #[must_use]
    pub fn ifrs_level(&self) -> IfrsLevel {
        self.ifrs_level
    }
}
