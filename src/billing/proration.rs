//! Fractional coverage of partial billing periods.

use chrono::NaiveDate;
use tracing::trace;

use super::{calendar::days_between, period::Period};
use crate::{
    errors::Result,
    precision::{PrecisionPolicy, ProrationFraction},
};

/// Fraction of a `reference_days` window covered by `start..end`.
///
/// A non-positive reference window yields zero. An inverted interval yields a
/// negative fraction; it is not clamped.
pub fn proration_fraction(
    start: NaiveDate,
    end: NaiveDate,
    reference_days: i64,
    policy: &PrecisionPolicy,
) -> ProrationFraction {
    if reference_days <= 0 {
        trace!(reference_days, "degenerate reference window, fraction is zero");
        return ProrationFraction::ZERO;
    }
    let days = days_between(start, end);
    ProrationFraction::new(policy.divide(days, reference_days))
}

/// Fraction of `start..end` measured against the cycle `previous_cycle..next_cycle`.
///
/// Used when recomputing partial items against known cycle boundaries.
pub fn proration_between_cycle_dates(
    start: NaiveDate,
    end: NaiveDate,
    previous_cycle: NaiveDate,
    next_cycle: NaiveDate,
    policy: &PrecisionPolicy,
) -> ProrationFraction {
    let reference_days = days_between(previous_cycle, next_cycle);
    proration_fraction(start, end, reference_days, policy)
}

/// Fraction for a subscription starting on `start`, before its first full
/// cycle ending on `next_cycle`.
pub fn proration_before_first_cycle(
    start: NaiveDate,
    next_cycle: NaiveDate,
    period: &Period,
    policy: &PrecisionPolicy,
) -> Result<ProrationFraction> {
    let previous_cycle = period.subtract_from(next_cycle)?;
    Ok(proration_between_cycle_dates(
        start,
        next_cycle,
        previous_cycle,
        next_cycle,
        policy,
    ))
}

/// Fraction for a subscription ending on `end`, after its last full cycle
/// billed through `previous_bill_through`.
///
/// `previous_bill_through` must already be aligned to the billing cycle day;
/// it is not re-checked here.
pub fn proration_after_last_cycle(
    end: NaiveDate,
    previous_bill_through: NaiveDate,
    period: &Period,
    policy: &PrecisionPolicy,
) -> Result<ProrationFraction> {
    let next_bill_through = period.add_to(previous_bill_through)?;
    Ok(proration_between_cycle_dates(
        previous_bill_through,
        end,
        previous_bill_through,
        next_bill_through,
        policy,
    ))
}
