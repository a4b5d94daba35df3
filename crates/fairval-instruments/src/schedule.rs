//! Coupon schedule generation.

use fairval_core::types::{Date, Frequency};

use crate::error::{ProjectionError, ProjectionResult};

/// Generates periodic payment dates for an instrument.
///
/// Steps backward from maturity at the frequency's stride until reaching
/// the issue date; the issue date itself is not a payment date. A supplied
/// `first_coupon` that does not align with the regular stride replaces the
/// first regular date as a short or long stub boundary; later dates keep
/// the maturity-anchored grid.
///
/// `Frequency::Zero` yields a schedule containing only the maturity date.
///
/// # Errors
///
/// Returns `InvalidScheduleWindow` when `maturity <= issue`.
pub fn generate_schedule(
    issue: Date,
    maturity: Date,
    frequency: Frequency,
    first_coupon: Option<Date>,
) -> ProjectionResult<Vec<Date>> {
    if maturity <= issue {
        return Err(ProjectionError::invalid_window(issue, maturity));
    }

    if frequency.is_zero() {
        return Ok(vec![maturity]);
    }

    let stride = frequency.months_per_period() as i32;
    let mut dates = vec![maturity];

    // Step backward from maturity in whole strides to avoid day-clamp drift
    let mut periods_back = 1;
    loop {
        let date = maturity.add_months(-periods_back * stride)?;
        if date <= issue {
            break;
        }
        dates.push(date);
        periods_back += 1;
    }
    dates.reverse();

    if let Some(stub) = first_coupon {
        if stub > issue && stub < maturity && !dates.contains(&stub) {
            let cutoff = dates[0].max(stub);
            // The final payment date always survives stub replacement
            dates.retain(|&d| d > cutoff || d == maturity);
            dates.insert(0, stub);
        }
    }

    Ok(dates)
}

/// Returns accrual periods `(start, end)` for a payment schedule.
///
/// The first period starts at the issue date; each payment date closes the
/// period that ends on it.
#[must_use]
pub fn accrual_periods(issue: Date, schedule: &[Date]) -> Vec<(Date, Date)> {
    let mut periods = Vec::with_capacity(schedule.len());
    let mut start = issue;
    for &end in schedule {
        periods.push((start, end));
        start = end;
    }
    periods
}
