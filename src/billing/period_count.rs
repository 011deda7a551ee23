use chrono::NaiveDate;
use tracing::trace;

use super::{
    calendar::{days_between, months_between, weeks_between, years_between},
    period::Period,
};
use crate::errors::{ProrationError, Result};

/// Counts whole periods between `start` and `end`.
///
/// The calendar difference is measured in the period's own unit and divided by
/// its magnitude, truncating toward zero. An inverted interval gives a negative
/// count. A zero-magnitude period is rejected.
pub fn whole_periods_between(start: NaiveDate, end: NaiveDate, period: &Period) -> Result<i64> {
    let (elapsed, magnitude) = match *period {
        Period::Days(n) => (days_between(start, end), n),
        Period::Weeks(n) => (weeks_between(start, end), n),
        Period::Months(n) => (months_between(start, end), n),
        Period::Years(n) => (years_between(start, end), n),
    };
    if magnitude == 0 {
        return Err(ProrationError::InvalidPeriod(format!(
            "{} has zero magnitude",
            period.unit()
        )));
    }
    let count = elapsed / magnitude as i64;
    trace!(%start, %end, %period, elapsed, count, "counted whole periods");
    Ok(count)
}
