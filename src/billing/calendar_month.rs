//! Calendar-month aligned proration.
//!
//! Monthly subscriptions are billed on a fixed anchor day of the month. A
//! subscription whose first month is partial is realigned to its billing start
//! date, and a first month cancelled exactly on the anchor day is not billed.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    calendar::{days_between, same_calendar_month, with_day_of_month},
    period::Period,
    proration::proration_fraction,
};
use crate::{
    errors::Result,
    precision::{PrecisionPolicy, ProrationFraction},
};

/// Day of the month on which monthly billing cycles start.
pub const BILLING_ANCHOR_DAY: u32 = 5;

/// Days subtracted from an anchor-day cycle date to close a first open item.
pub const ANCHOR_LOOKBACK_DAYS: u32 = 4;

/// One billable recurring line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringItemResult {
    pub start_date: NaiveDate,
    /// `None` while the item is still open-ended.
    pub end_date: Option<NaiveDate>,
    pub proration: ProrationFraction,
}

/// Fraction of a calendar month covered by `start..end`, applying the
/// billing-start realignment rules when `period` is exactly one month.
pub fn align_for_calendar_month(
    start: NaiveDate,
    end: NaiveDate,
    period: &Period,
    billing_start: NaiveDate,
    policy: &PrecisionPolicy,
) -> Result<ProrationFraction> {
    let mut start = start;
    let mut end = end;

    if period.is_monthly() {
        let anchor_before_previous_month = with_day_of_month(
            Period::MONTHLY.subtract_from(start)?,
            BILLING_ANCHOR_DAY,
        );
        if Period::MONTHLY.add_to(start)? == end && billing_start < anchor_before_previous_month {
            debug!(%start, %end, %billing_start, "full month well after billing start");
            return Ok(ProrationFraction::ONE);
        }

        if same_calendar_month(billing_start, start) {
            start = billing_start;
            if !same_calendar_month(start, end) {
                end = with_day_of_month(end, 1);
                debug!(%start, %end, "first partial month realigned to billing start");
            } else if end.day() == BILLING_ANCHOR_DAY {
                debug!(%start, %end, "first month cancelled on anchor day is not billed");
                return Ok(ProrationFraction::ZERO);
            }
        }
    }

    let reference_days = days_between(start, Period::MONTHLY.add_to(start)?);
    Ok(proration_fraction(start, end, reference_days, policy))
}

/// Builds the recurring item for `start..end` of a monthly subscription whose
/// first billing cycle falls on `first_billing_cycle`.
///
/// An open-ended first item is closed at the first billing cycle date (or four
/// days before it when it is on the anchor day).
pub fn align_recurring_item(
    start: NaiveDate,
    end: Option<NaiveDate>,
    first_billing_cycle: NaiveDate,
    policy: &PrecisionPolicy,
) -> Result<RecurringItemResult> {
    let one_month_later = Period::MONTHLY.add_to(start)?;

    let proration = match end {
        None if first_billing_cycle < one_month_later => {
            let mut end = if first_billing_cycle.day() == BILLING_ANCHOR_DAY {
                Period::Days(ANCHOR_LOOKBACK_DAYS).subtract_from(first_billing_cycle)?
            } else {
                first_billing_cycle
            };
            if end < start {
                end = Period::MONTHLY.add_to(end)?;
            }
            let reference_days = days_between(start, one_month_later);
            let proration = proration_fraction(start, end, reference_days, policy);
            debug!(%start, %end, %proration, "closed first open recurring item");
            return Ok(RecurringItemResult {
                start_date: start,
                end_date: Some(end),
                proration,
            });
        }
        Some(end) if end != one_month_later => align_for_calendar_month(
            start,
            end,
            &Period::MONTHLY,
            first_billing_cycle,
            policy,
        )?,
        _ => ProrationFraction::ONE,
    };

    Ok(RecurringItemResult {
        start_date: start,
        end_date: end,
        proration,
    })
}
