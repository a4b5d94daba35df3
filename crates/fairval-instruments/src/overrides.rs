//! Valuation-context overrides supplied to projection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use fairval_core::types::Date;

/// State supplied by the valuation context rather than the contract.
///
/// Call exercise is a business decision, index levels and rate fixings are
/// market observations; none of them belong to [`SecurityTerms`] and all of
/// them are optional.
///
/// [`SecurityTerms`]: crate::terms::SecurityTerms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOverrides {
    /// Call date being exercised. Must match an entry in the call schedule.
    pub call_exercised: Option<Date>,

    /// Current inflation index level. The index ratio against the terms'
    /// base index scales inflation-linked coupons and principal; absent,
    /// the ratio defaults to 1 (real terms).
    pub index_level: Option<Decimal>,

    /// Historical reference-rate fixings keyed by reset (period start)
    /// date. Resets without a fixing use the current reference-rate
    /// snapshot held flat forward.
    pub fixings: BTreeMap<Date, Decimal>,
}

impl ProjectionOverrides {
    /// Creates empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a call date as exercised.
    #[must_use]
    pub fn with_call_exercised(mut self, call_date: Date) -> Self {
        self.call_exercised = Some(call_date);
        self
    }

    /// Sets the current inflation index level.
    #[must_use]
    pub fn with_index_level(mut self, level: Decimal) -> Self {
        self.index_level = Some(level);
        self
    }

    /// Records a reference-rate fixing for a reset date.
    #[must_use]
    pub fn with_fixing(mut self, reset_date: Date, rate: Decimal) -> Self {
        self.fixings.insert(reset_date, rate);
        self
    }
}
