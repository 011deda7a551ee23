//! Gregorian calendar helpers over [`NaiveDate`].
//!
//! Month and year shifts keep the day-of-month and clamp it to the length of
//! the target month, so `2021-01-31` plus one month is `2021-02-28`.

use chrono::{Datelike, Days, NaiveDate};

/// Signed number of days from `start` to `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Whole weeks from `start` to `end`, truncated toward zero.
pub fn weeks_between(start: NaiveDate, end: NaiveDate) -> i64 {
    days_between(start, end) / 7
}

/// Whole calendar months from `start` to `end`.
///
/// A month counts once `start` shifted by that many months (with clamping)
/// is on or before `end`. Inverted intervals yield the negated count.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return -months_between(end, start);
    }
    let mut diff = month_index(end) - month_index(start);
    if shift_month(start, diff).map_or(true, |shifted| shifted > end) {
        diff -= 1;
    }
    diff
}

/// Whole calendar years from `start` to `end`, with the same clamping rule as
/// [`months_between`] (Feb 29 to the following Feb 28 is one year).
pub fn years_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return -years_between(end, start);
    }
    let mut diff = (end.year() - start.year()) as i64;
    if shift_year(start, diff).map_or(true, |shifted| shifted > end) {
        diff -= 1;
    }
    diff
}

/// Shifts `date` by `days`, or `None` past the representable date range.
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    }
}

/// Shifts `date` by `months` calendar months, clamping the day to the target month.
pub fn shift_month(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let target = month_index(date).checked_add(months)?;
    let year = i32::try_from(target.div_euclid(12)).ok()?;
    let month = (target.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Shifts `date` by `years` calendar years, clamping Feb 29 to Feb 28.
pub fn shift_year(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    let year = i32::try_from((date.year() as i64).checked_add(years)?).ok()?;
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Replaces the day-of-month, clamping to the last day of the month.
pub fn with_day_of_month(date: NaiveDate, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(date.year(), date.month()));
    date.with_day(day).unwrap_or(date)
}

/// True when both dates fall in the same year and month.
pub fn same_calendar_month(a: NaiveDate, b: NaiveDate) -> bool {
    month_index(a) == month_index(b)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(first_next)) => (first_next - first).num_days() as u32,
        _ => 28,
    }
}

fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}
