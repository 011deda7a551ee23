#![doc(test(attr(deny(warnings))))]

//! Invoice Proration computes pro-rated billing fractions and whole-period
//! counts for subscription invoicing: given a billing period and calendar
//! dates it tells how much of a period an interval covers and how many full
//! periods elapse between two dates.
//!
//! ```
//! use chrono::NaiveDate;
//! use invoice_proration::{proration_before_first_cycle, Period, PrecisionPolicy};
//!
//! let start = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();
//! let next_cycle = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
//! let fraction = proration_before_first_cycle(
//!     start,
//!     next_cycle,
//!     &Period::MONTHLY,
//!     &PrecisionPolicy::default(),
//! )?;
//! assert_eq!(fraction.to_string(), "0.548387097");
//! # Ok::<(), invoice_proration::ProrationError>(())
//! ```

pub mod billing;
pub mod config;
pub mod errors;
pub mod precision;
pub mod utils;

pub use billing::{
    align_for_calendar_month, align_recurring_item, proration_after_last_cycle,
    proration_before_first_cycle, proration_between_cycle_dates, proration_fraction,
    whole_periods_between, Period, PeriodDescriptor, PeriodUnit, RecurringItemResult,
};
pub use config::{default_config_dir, Config, ConfigError, ConfigManager};
pub use errors::{ProrationError, Result};
pub use precision::{PrecisionPolicy, ProrationFraction, RoundingMode};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Invoice proration tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
