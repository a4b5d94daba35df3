//! Day count conventions for interest accrual.
//!
//! Day count conventions determine how accrued interest is calculated
//! by specifying how to count days between two dates and the year basis.
//!
//! # Supported Conventions
//!
//! - [`DayCountConvention::Thirty360`]: 30/360 US bond basis
//! - [`DayCountConvention::Thirty360E`]: 30E/360 Eurobond basis
//! - [`DayCountConvention::Act360`]: Actual/360 money-market convention
//! - [`DayCountConvention::Act365`]: Actual/365 Fixed
//! - [`DayCountConvention::ActActIsda`]: Actual/Actual ISDA year-split
//!
//! # Usage
//!
//! ```rust
//! use fairval_core::daycounts::DayCountConvention;
//! use fairval_core::types::Date;
//!
//! let dc = DayCountConvention::Thirty360;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let days = dc.day_count(start, end);
//! let year_fraction = dc.year_fraction(start, end);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Date;

/// Enumeration of supported day count conventions.
///
/// Persisted convention strings parse via [`FromStr`]; unrecognized values
/// fail with [`CoreError::InvalidConvention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// 30/360 US (Bond Basis) - caps the end day at 30 only when the
    /// start day is already 30 or 31.
    Thirty360,

    /// 30E/360 (Eurobond Basis) - caps both days at 30 unconditionally.
    Thirty360E,

    /// Actual/360 - money market instruments, FRNs, term loans.
    Act360,

    /// Actual/365 Fixed.
    Act365,

    /// Actual/Actual ISDA - actual days divided by actual days in the
    /// annual period, split at year boundaries.
    ActActIsda,
}

impl DayCountConvention {
    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::Thirty360E => "30E/360",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365 => "ACT/365",
            DayCountConvention::ActActIsda => "ACT/ACT",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Thirty360,
            DayCountConvention::Thirty360E,
            DayCountConvention::Act360,
            DayCountConvention::Act365,
            DayCountConvention::ActActIsda,
        ]
    }

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions this is actual calendar days; for 30/360
    /// conventions it uses the 30-day-month assumption.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountConvention::Thirty360 => thirty360_days(start, end, false),
            DayCountConvention::Thirty360E => thirty360_days(start, end, true),
            DayCountConvention::Act360
            | DayCountConvention::Act365
            | DayCountConvention::ActActIsda => start.days_between(&end),
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end < start`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        match self {
            DayCountConvention::Thirty360 | DayCountConvention::Thirty360E => {
                Decimal::from(self.day_count(start, end)) / Decimal::from(360)
            }
            DayCountConvention::Act360 => {
                Decimal::from(start.days_between(&end)) / Decimal::from(360)
            }
            DayCountConvention::Act365 => {
                Decimal::from(start.days_between(&end)) / Decimal::from(365)
            }
            DayCountConvention::ActActIsda => act_act_isda(start, end),
        }
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a day count convention from a persisted string.
    ///
    /// Accepts the market names plus common aliases
    /// (`"ACTUAL/360"`, `"ACT/365F"`, `"ACT/ACT ISDA"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "30/360" | "30/360 US" | "BOND" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            "30E/360" | "EUROBOND" | "THIRTY360E" => Ok(DayCountConvention::Thirty360E),
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACTUAL/365" | "ACT365" => Ok(DayCountConvention::Act365),
            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTACT" => {
                Ok(DayCountConvention::ActActIsda)
            }
            _ => Err(CoreError::invalid_convention(s)),
        }
    }
}

/// 30/360 day count with optional European end-of-month handling.
fn thirty360_days(start: Date, end: Date, european: bool) -> i64 {
    let mut d1 = start.day() as i64;
    let mut d2 = end.day() as i64;

    if d1 == 31 {
        d1 = 30;
    }
    if d2 == 31 && (european || d1 >= 30) {
        d2 = 30;
    }

    360 * i64::from(end.year() - start.year())
        + 30 * (i64::from(end.month()) - i64::from(start.month()))
        + (d2 - d1)
}

/// ACT/ACT ISDA year fraction: each calendar-year slice of the interval is
/// divided by that year's actual length.
fn act_act_isda(start: Date, end: Date) -> Decimal {
    if start == end {
        return Decimal::ZERO;
    }
    if end < start {
        return -act_act_isda(end, start);
    }

    if start.year() == end.year() {
        return Decimal::from(start.days_between(&end)) / Decimal::from(start.days_in_year());
    }

    let start_year_end = start
        .start_of_next_year()
        .expect("January 1 is always a valid date");
    let end_year_start =
        Date::from_ymd(end.year(), 1, 1).expect("January 1 is always a valid date");

    let head = Decimal::from(start.days_between(&start_year_end))
        / Decimal::from(start.days_in_year());
    let whole_years = Decimal::from(end.year() - start.year() - 1);
    let tail =
        Decimal::from(end_year_start.days_between(&end)) / Decimal::from(end.days_in_year());

    head + whole_years + tail
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_thirty360_full_year() {
        let dc = DayCountConvention::Thirty360;
        assert_eq!(dc.day_count(d(2025, 1, 1), d(2026, 1, 1)), 360);
        assert_eq!(dc.year_fraction(d(2025, 1, 1), d(2026, 1, 1)), dec!(1));
    }

    #[test]
    fn test_thirty360_vs_e_on_day_31() {
        // Jan 15 -> Jul 31: US keeps d2=31 (d1 < 30), European caps at 30
        let us = DayCountConvention::Thirty360;
        let eu = DayCountConvention::Thirty360E;

        assert_eq!(us.day_count(d(2025, 1, 15), d(2025, 7, 31)), 196);
        assert_eq!(eu.day_count(d(2025, 1, 15), d(2025, 7, 31)), 195);
    }

    #[test]
    fn test_thirty360_d1_31_capped() {
        let us = DayCountConvention::Thirty360;
        // Jan 31 -> Jul 31: both capped to 30 under US rule since d1 >= 30
        assert_eq!(us.day_count(d(2025, 1, 31), d(2025, 7, 31)), 180);
    }

    #[test]
    fn test_act360() {
        let dc = DayCountConvention::Act360;
        assert_eq!(dc.day_count(d(2025, 1, 1), d(2025, 7, 1)), 181);
        assert_eq!(
            dc.year_fraction(d(2025, 1, 1), d(2025, 7, 1)),
            dec!(181) / dec!(360)
        );
    }

    #[test]
    fn test_act365_full_year() {
        let dc = DayCountConvention::Act365;
        assert_eq!(dc.year_fraction(d(2025, 1, 1), d(2026, 1, 1)), dec!(1));
    }

    #[test]
    fn test_actact_same_year() {
        let dc = DayCountConvention::ActActIsda;
        // 181 days in non-leap 2025
        assert_eq!(
            dc.year_fraction(d(2025, 1, 1), d(2025, 7, 1)),
            dec!(181) / dec!(365)
        );
    }

    #[test]
    fn test_actact_leap_year_split() {
        let dc = DayCountConvention::ActActIsda;
        // 2023-07-01 -> 2024-07-01 spans a non-leap tail and a leap head:
        // 184/365 + 182/366
        let expected = dec!(184) / dec!(365) + dec!(182) / dec!(366);
        assert_eq!(dc.year_fraction(d(2023, 7, 1), d(2024, 7, 1)), expected);
    }

    #[test]
    fn test_actact_multi_year() {
        let dc = DayCountConvention::ActActIsda;
        assert_eq!(dc.year_fraction(d(2023, 1, 1), d(2026, 1, 1)), dec!(3));
    }

    #[test]
    fn test_negative_interval() {
        let dc = DayCountConvention::ActActIsda;
        let forward = dc.year_fraction(d(2024, 1, 1), d(2025, 1, 1));
        let backward = dc.year_fraction(d(2025, 1, 1), d(2024, 1, 1));
        assert_eq!(forward, -backward);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360
        );
        assert_eq!(
            "30E/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360E
        );
        assert_eq!(
            "act/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "ACT/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365
        );
        assert_eq!(
            "ACT/ACT".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActActIsda
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let err = "ACT/252".parse::<DayCountConvention>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidConvention { .. }));
    }

    #[test]
    fn test_name_roundtrip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }
}
