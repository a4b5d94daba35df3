//! Valuation audit trail.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fairval_core::types::Date;

use crate::run::RunId;

/// One append-only record of a valuation: the inputs that produced a
/// result and the outputs, enough to reproduce the number later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the valuation happened.
    pub timestamp: DateTime<Utc>,
    /// Run that produced the result.
    pub run_id: RunId,
    /// Security valued.
    pub security_id: String,
    /// Valuation date.
    pub valuation_date: Date,
    /// Name of the discount curve used.
    pub curve_name: String,
    /// Market date of the curve snapshot.
    pub curve_date: Date,
    /// Z-spread applied, in decimal rate units.
    pub z_spread: Decimal,
    /// Discounted value of future cash flows.
    pub present_value: Decimal,
    /// Accrued interest at the valuation date.
    pub accrued_interest: Decimal,
    /// Present value plus accrued.
    pub fair_value: Decimal,
}

impl AuditEntry {
    /// Stamps an entry with the current time.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        run_id: RunId,
        security_id: impl Into<String>,
        valuation_date: Date,
        curve_name: impl Into<String>,
        curve_date: Date,
        z_spread: Decimal,
        present_value: Decimal,
        accrued_interest: Decimal,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            run_id,
            security_id: security_id.into(),
            valuation_date,
            curve_name: curve_name.into(),
            curve_date,
            z_spread,
            present_value,
            accrued_interest,
            fair_value: present_value + accrued_interest,
        }
    }
}
