pub mod calendar;
pub mod calendar_month;
pub mod period;
pub mod period_count;
pub mod proration;

pub use calendar_month::{
    align_for_calendar_month, align_recurring_item, RecurringItemResult, ANCHOR_LOOKBACK_DAYS,
    BILLING_ANCHOR_DAY,
};
pub use period::{Period, PeriodDescriptor, PeriodUnit};
pub use period_count::whole_periods_between;
pub use proration::{
    proration_after_last_cycle, proration_before_first_cycle, proration_between_cycle_dates,
    proration_fraction,
};
