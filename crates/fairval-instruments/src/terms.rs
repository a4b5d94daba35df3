//! Immutable contractual terms of a security.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use fairval_core::daycounts::DayCountConvention;
use fairval_core::types::{Currency, Date, Frequency};

use crate::error::{ProjectionError, ProjectionResult};

/// Instrument family, as persisted by the reference-data layer.
///
/// Parsing a persisted type string is the boundary where loosely-typed
/// reference data enters the closed [`InstrumentKind`] enum; unknown
/// strings fail with [`ProjectionError::UnsupportedInstrumentType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    /// Fixed-coupon bond.
    BondFixed,
    /// Zero-coupon bond.
    BondZero,
    /// Floating-rate bond.
    BondFloating,
    /// Step-up coupon bond.
    BondStepUp,
    /// Inflation-linked bond.
    BondInflationLinked,
    /// Amortizing term loan.
    LoanTerm,
}

impl InstrumentType {
    /// Returns the persisted type string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentType::BondFixed => "bond_fixed",
            InstrumentType::BondZero => "bond_zero",
            InstrumentType::BondFloating => "bond_floating",
            InstrumentType::BondStepUp => "bond_step_up",
            InstrumentType::BondInflationLinked => "bond_inflation_linked",
            InstrumentType::LoanTerm => "loan_term",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InstrumentType {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bond_fixed" => Ok(InstrumentType::BondFixed),
            "bond_zero" => Ok(InstrumentType::BondZero),
            "bond_floating" => Ok(InstrumentType::BondFloating),
            "bond_step_up" => Ok(InstrumentType::BondStepUp),
            "bond_inflation_linked" => Ok(InstrumentType::BondInflationLinked),
            "loan_term" => Ok(InstrumentType::LoanTerm),
            _ => Err(ProjectionError::UnsupportedInstrumentType {
                value: s.to_string(),
            }),
        }
    }
}

/// One step in a step-up coupon schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEntry {
    /// Date from which the new coupon applies.
    pub effective_date: Date,
    /// Coupon rate in decimal units from the effective date.
    pub new_coupon: Decimal,
}

/// One entry in a call schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEntry {
    /// Date on which the issuer may call.
    pub call_date: Date,
    /// Redemption price per 100 of face value.
    pub call_price: Decimal,
}

/// Family-specific contractual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Fixed-coupon bond.
    Fixed {
        /// Annual coupon rate in decimal units.
        coupon: Decimal,
    },
    /// Zero-coupon bond: single principal payment at maturity.
    Zero,
    /// Floating-rate bond.
    Floating {
        /// Current reference-rate snapshot in decimal units.
        reference_rate: Decimal,
        /// Quoted margin over the reference rate.
        spread: Decimal,
        /// Coupon floor, if any.
        floor: Option<Decimal>,
    },
    /// Step-up coupon bond.
    StepUp {
        /// Coupon rate before the first step.
        base_coupon: Decimal,
        /// Ordered coupon steps, strictly increasing by effective date.
        steps: Vec<StepEntry>,
    },
    /// Inflation-linked bond.
    InflationLinked {
        /// Real coupon rate in decimal units.
        coupon: Decimal,
        /// Index level at issue; the index ratio scales against this.
        base_index: Decimal,
    },
    /// Amortizing term loan. Accrues on the outstanding amount.
    TermLoan {
        /// Annual coupon rate in decimal units.
        coupon: Decimal,
        /// Outstanding principal amount.
        outstanding: Decimal,
    },
}

impl InstrumentKind {
    /// Returns the instrument type tag for this family.
    #[must_use]
    pub fn instrument_type(&self) -> InstrumentType {
        match self {
            InstrumentKind::Fixed { .. } => InstrumentType::BondFixed,
            InstrumentKind::Zero => InstrumentType::BondZero,
            InstrumentKind::Floating { .. } => InstrumentType::BondFloating,
            InstrumentKind::StepUp { .. } => InstrumentType::BondStepUp,
            InstrumentKind::InflationLinked { .. } => InstrumentType::BondInflationLinked,
            InstrumentKind::TermLoan { .. } => InstrumentType::LoanTerm,
        }
    }
}

/// Immutable contractual terms of one instrument.
///
/// Constructed once at load time from persisted reference data; schedules
/// are validated ordered value types, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityTerms {
    security_id: String,
    currency: Currency,
    face_value: Decimal,
    issue_date: Date,
    maturity_date: Date,
    frequency: Frequency,
    day_count: DayCountConvention,
    first_coupon_date: Option<Date>,
    call_schedule: Vec<CallEntry>,
    kind: InstrumentKind,
}

impl SecurityTerms {
    /// Creates validated security terms.
    ///
    /// The day-count convention defaults per family: ACT/360 for term
    /// loans, 30/360 otherwise; override with [`with_day_count`].
    ///
    /// # Errors
    ///
    /// - `InvalidScheduleWindow` when `maturity_date <= issue_date`
    /// - `InvalidTerms` for negative coupons or a zero-coupon instrument
    ///   with a periodic frequency
    ///
    /// [`with_day_count`]: SecurityTerms::with_day_count
    pub fn new(
        security_id: impl Into<String>,
        currency: Currency,
        face_value: Decimal,
        issue_date: Date,
        maturity_date: Date,
        frequency: Frequency,
        kind: InstrumentKind,
    ) -> ProjectionResult<Self> {
        if maturity_date <= issue_date {
            return Err(ProjectionError::invalid_window(issue_date, maturity_date));
        }

        let day_count = match kind {
            InstrumentKind::TermLoan { .. } => DayCountConvention::Act360,
            _ => DayCountConvention::Thirty360,
        };

        let terms = Self {
            security_id: security_id.into(),
            currency,
            face_value,
            issue_date,
            maturity_date,
            frequency,
            day_count,
            first_coupon_date: None,
            call_schedule: Vec::new(),
            kind,
        };
        terms.validate()?;
        Ok(terms)
    }

    fn validate(&self) -> ProjectionResult<()> {
        match &self.kind {
            InstrumentKind::Zero => {
                if !self.frequency.is_zero() {
                    return Err(ProjectionError::invalid_terms(
                        "zero-coupon instrument requires zero frequency",
                    ));
                }
            }
            InstrumentKind::Fixed { coupon } | InstrumentKind::TermLoan { coupon, .. } => {
                if *coupon < Decimal::ZERO {
                    return Err(ProjectionError::invalid_terms("coupon must be non-negative"));
                }
            }
            InstrumentKind::InflationLinked { coupon, base_index } => {
                if *coupon < Decimal::ZERO {
                    return Err(ProjectionError::invalid_terms("coupon must be non-negative"));
                }
                if *base_index <= Decimal::ZERO {
                    return Err(ProjectionError::invalid_terms("base index must be positive"));
                }
            }
            InstrumentKind::StepUp { base_coupon, steps } => {
                if *base_coupon < Decimal::ZERO {
                    return Err(ProjectionError::invalid_terms("coupon must be non-negative"));
                }
                for window in steps.windows(2) {
                    if window[1].effective_date <= window[0].effective_date {
                        return Err(ProjectionError::invalid_terms(
                            "step schedule dates must be strictly increasing",
                        ));
                    }
                }
            }
            InstrumentKind::Floating { .. } => {}
        }

        for window in self.call_schedule.windows(2) {
            if window[1].call_date <= window[0].call_date {
                return Err(ProjectionError::invalid_terms(
                    "call schedule dates must be strictly increasing",
                ));
            }
        }

        Ok(())
    }

    /// Overrides the day-count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets an explicit first coupon date (stub boundary).
    #[must_use]
    pub fn with_first_coupon_date(mut self, date: Date) -> Self {
        self.first_coupon_date = Some(date);
        self
    }

    /// Attaches a call schedule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTerms` if dates are not strictly increasing.
    pub fn with_call_schedule(mut self, schedule: Vec<CallEntry>) -> ProjectionResult<Self> {
        self.call_schedule = schedule;
        self.validate()?;
        Ok(self)
    }

    /// Returns the security id.
    #[must_use]
    pub fn security_id(&self) -> &str {
        &self.security_id
    }

    /// Returns the instrument currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the face value.
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the day-count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the explicit first coupon date, if any.
    #[must_use]
    pub fn first_coupon_date(&self) -> Option<Date> {
        self.first_coupon_date
    }

    /// Returns the call schedule.
    #[must_use]
    pub fn call_schedule(&self) -> &[CallEntry] {
        &self.call_schedule
    }

    /// Returns the family-specific fields.
    #[must_use]
    pub fn kind(&self) -> &InstrumentKind {
        &self.kind
    }

    /// Returns the instrument type tag.
    #[must_use]
    pub fn instrument_type(&self) -> InstrumentType {
        self.kind.instrument_type()
    }

    /// Returns true if the instrument pays periodic coupons.
    #[must_use]
    pub fn is_coupon_bearing(&self) -> bool {
        !matches!(self.kind, InstrumentKind::Zero)
    }
}
