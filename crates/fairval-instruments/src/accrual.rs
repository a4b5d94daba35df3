//! Accrued interest.

use rust_decimal::Decimal;

use fairval_core::types::Date;

use crate::error::ProjectionResult;
use crate::overrides::ProjectionOverrides;
use crate::project::{accrual_base, index_ratio, period_rate};
use crate::schedule::{accrual_periods, generate_schedule};
use crate::terms::SecurityTerms;

/// Interest accrued from the last coupon date up to the valuation date.
///
/// Zero for zero-coupon instruments, on a coupon date, and outside the
/// issue/maturity window. Uses the same period rate rules as projection,
/// so floating fixings, step-ups and index scaling carry through.
///
/// # Errors
///
/// Propagates schedule-generation failures.
pub fn accrued_interest(
    terms: &SecurityTerms,
    as_of: Date,
    overrides: &ProjectionOverrides,
) -> ProjectionResult<Decimal> {
    if !terms.is_coupon_bearing() || as_of <= terms.issue_date() || as_of >= terms.maturity_date()
    {
        return Ok(Decimal::ZERO);
    }

    let schedule = generate_schedule(
        terms.issue_date(),
        terms.maturity_date(),
        terms.frequency(),
        terms.first_coupon_date(),
    )?;

    // Period containing as_of; a coupon date opens its next period, so
    // accrual restarts at zero there
    let Some((start, _)) = accrual_periods(terms.issue_date(), &schedule)
        .into_iter()
        .find(|&(start, end)| start <= as_of && as_of < end)
    else {
        return Ok(Decimal::ZERO);
    };

    let rate = period_rate(terms, start, overrides);
    let fraction = terms.day_count().year_fraction(start, as_of);
    Ok(accrual_base(terms) * rate * fraction * index_ratio(terms, overrides))
}
