use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::{shift_days, shift_month, shift_year};
use crate::errors::{ProrationError, Result};

/// Enumerates the calendar units a billing period can be expressed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
    Year,
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodUnit::Day => "day",
            PeriodUnit::Week => "week",
            PeriodUnit::Month => "month",
            PeriodUnit::Year => "year",
        };
        f.write_str(label)
    }
}

/// A billing cadence: one magnitude in exactly one calendar unit.
///
/// Months and years are calendar-relative. Adding them to a date shifts the
/// month/year fields and clamps the day, it never adds a flat day count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Period {
    Days(u32),
    Weeks(u32),
    Months(u32),
    Years(u32),
}

impl Period {
    pub const MONTHLY: Period = Period::Months(1);

    pub fn unit(&self) -> PeriodUnit {
        match self {
            Period::Days(_) => PeriodUnit::Day,
            Period::Weeks(_) => PeriodUnit::Week,
            Period::Months(_) => PeriodUnit::Month,
            Period::Years(_) => PeriodUnit::Year,
        }
    }

    pub fn magnitude(&self) -> u32 {
        match *self {
            Period::Days(n) | Period::Weeks(n) | Period::Months(n) | Period::Years(n) => n,
        }
    }

    /// True for a single calendar month, the only cadence the calendar-month
    /// alignment rules apply to.
    pub fn is_monthly(&self) -> bool {
        matches!(self, Period::Months(1))
    }

    /// Returns the date one period after `from`.
    pub fn add_to(&self, from: NaiveDate) -> Result<NaiveDate> {
        let shifted = match *self {
            Period::Days(n) => shift_days(from, n as i64),
            Period::Weeks(n) => shift_days(from, n as i64 * 7),
            Period::Months(n) => shift_month(from, n as i64),
            Period::Years(n) => shift_year(from, n as i64),
        };
        shifted.ok_or_else(|| out_of_range(from, self, "after"))
    }

    /// Returns the date one period before `from`.
    pub fn subtract_from(&self, from: NaiveDate) -> Result<NaiveDate> {
        let shifted = match *self {
            Period::Days(n) => shift_days(from, -(n as i64)),
            Period::Weeks(n) => shift_days(from, -(n as i64) * 7),
            Period::Months(n) => shift_month(from, -(n as i64)),
            Period::Years(n) => shift_year(from, -(n as i64)),
        };
        shifted.ok_or_else(|| out_of_range(from, self, "before"))
    }

    /// Applies the period `steps` times, one step at a time.
    ///
    /// Stepping matters once the day-of-month clamps: three single-month steps
    /// from Jan 31 land on Apr 28, a single three-month step lands on Apr 30.
    pub fn advance(&self, from: NaiveDate, steps: u32) -> Result<NaiveDate> {
        (0..steps).try_fold(from, |date, _| self.add_to(date))
    }

    /// Inverse stepping of [`Period::advance`].
    pub fn recede(&self, from: NaiveDate, steps: u32) -> Result<NaiveDate> {
        (0..steps).try_fold(from, |date, _| self.subtract_from(date))
    }

    pub fn label(&self) -> String {
        match (self.magnitude(), self.unit()) {
            (1, PeriodUnit::Day) => "Daily".into(),
            (1, PeriodUnit::Week) => "Weekly".into(),
            (1, PeriodUnit::Month) => "Monthly".into(),
            (1, PeriodUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {}{}", n, unit, if n > 1 { "s" } else { "" }),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.magnitude();
        write!(f, "{} {}{}", n, self.unit(), if n == 1 { "" } else { "s" })
    }
}

impl FromStr for Period {
    type Err = ProrationError;

    /// Parses labels such as `"1 month"`, `"2 weeks"` or `"30 days"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(count), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ProrationError::InvalidPeriod(format!(
                "expected `<count> <unit>`, got `{s}`"
            )));
        };
        let count: u32 = count
            .parse()
            .map_err(|_| ProrationError::InvalidPeriod(format!("invalid count `{count}`")))?;
        let unit = unit.to_ascii_lowercase();
        let period = match unit.trim_end_matches('s') {
            "day" => Period::Days(count),
            "week" => Period::Weeks(count),
            "month" => Period::Months(count),
            "year" => Period::Years(count),
            _ => {
                return Err(ProrationError::InvalidPeriod(format!(
                    "unknown unit `{unit}`"
                )))
            }
        };
        Ok(period)
    }
}

/// The four-field period shape handed over by a billing-period catalog.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodDescriptor {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub weeks: u32,
    #[serde(default)]
    pub months: u32,
    #[serde(default)]
    pub years: u32,
}

impl TryFrom<PeriodDescriptor> for Period {
    type Error = ProrationError;

    /// Classifies by the first non-zero field, checked days, weeks, months, years.
    fn try_from(value: PeriodDescriptor) -> std::result::Result<Self, Self::Error> {
        if value.days != 0 {
            Ok(Period::Days(value.days))
        } else if value.weeks != 0 {
            Ok(Period::Weeks(value.weeks))
        } else if value.months != 0 {
            Ok(Period::Months(value.months))
        } else if value.years != 0 {
            Ok(Period::Years(value.years))
        } else {
            Err(ProrationError::InvalidPeriod(
                "period descriptor has no non-zero magnitude".into(),
            ))
        }
    }
}

impl From<Period> for PeriodDescriptor {
    fn from(period: Period) -> Self {
        let mut descriptor = PeriodDescriptor::default();
        match period {
            Period::Days(n) => descriptor.days = n,
            Period::Weeks(n) => descriptor.weeks = n,
            Period::Months(n) => descriptor.months = n,
            Period::Years(n) => descriptor.years = n,
        }
        descriptor
    }
}

fn out_of_range(from: NaiveDate, period: &Period, direction: &str) -> ProrationError {
    ProrationError::DateOutOfRange(format!("{period} {direction} {from}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_to_uses_calendar_units() {
        let start = date(2025, 1, 1);
        assert_eq!(Period::Days(3).add_to(start).unwrap(), date(2025, 1, 4));
        assert_eq!(Period::Weeks(2).add_to(start).unwrap(), date(2025, 1, 15));
        assert_eq!(Period::Months(1).add_to(start).unwrap(), date(2025, 2, 1));
        assert_eq!(Period::Years(1).add_to(start).unwrap(), date(2026, 1, 1));
    }

    #[test]
    fn subtract_from_mirrors_add_to() {
        let start = date(2021, 3, 31);
        assert_eq!(Period::Months(1).subtract_from(start).unwrap(), date(2021, 2, 28));
        assert_eq!(Period::Weeks(1).subtract_from(start).unwrap(), date(2021, 3, 24));
        assert_eq!(
            Period::Years(1).subtract_from(date(2024, 2, 29)).unwrap(),
            date(2023, 2, 28)
        );
    }

    #[test]
    fn advance_steps_one_period_at_a_time() {
        let jan_31 = date(2021, 1, 31);
        assert_eq!(Period::MONTHLY.advance(jan_31, 3).unwrap(), date(2021, 4, 28));
        assert_eq!(Period::Months(3).advance(jan_31, 1).unwrap(), date(2021, 4, 30));
        assert_eq!(Period::MONTHLY.advance(jan_31, 0).unwrap(), jan_31);
        assert_eq!(Period::MONTHLY.recede(jan_31, 0).unwrap(), jan_31);
    }

    #[test]
    fn recede_steps_backwards() {
        let start = date(2021, 5, 15);
        assert_eq!(Period::MONTHLY.recede(start, 5).unwrap(), date(2020, 12, 15));
        assert_eq!(Period::Days(10).recede(start, 2).unwrap(), date(2021, 4, 25));
    }

    #[test]
    fn huge_magnitudes_are_out_of_range_not_wrapped() {
        let start = date(2021, 6, 1);
        for period in [
            Period::Days(u32::MAX),
            Period::Weeks(u32::MAX),
            Period::Months(3_000_000_000),
            Period::Months(u32::MAX),
            Period::Years(u32::MAX),
        ] {
            let err = period.add_to(start).unwrap_err();
            assert!(matches!(err, ProrationError::DateOutOfRange(_)), "{period}");
            let err = period.subtract_from(start).unwrap_err();
            assert!(matches!(err, ProrationError::DateOutOfRange(_)), "{period}");
        }
    }

    #[test]
    fn stepping_past_the_calendar_stops_with_an_error() {
        let near_end = NaiveDate::MAX;
        assert!(Period::Days(1).add_to(near_end).is_err());
        assert!(Period::Years(100_000).advance(date(2021, 6, 1), 3).is_err());
        assert!(Period::Years(100_000).recede(date(2021, 6, 1), 3).is_err());
        assert_eq!(
            Period::Years(100_000).advance(date(2021, 6, 1), 2).unwrap(),
            date(202_021, 6, 1)
        );
    }

    #[test]
    fn descriptor_classifies_in_priority_order() {
        let monthly = PeriodDescriptor {
            months: 1,
            ..Default::default()
        };
        assert_eq!(Period::try_from(monthly).unwrap(), Period::Months(1));

        let mixed = PeriodDescriptor {
            weeks: 2,
            years: 1,
            ..Default::default()
        };
        assert_eq!(Period::try_from(mixed).unwrap(), Period::Weeks(2));

        let err = Period::try_from(PeriodDescriptor::default()).unwrap_err();
        assert!(matches!(err, ProrationError::InvalidPeriod(_)));
    }

    #[test]
    fn descriptor_roundtrips_through_period() {
        let descriptor = PeriodDescriptor::from(Period::Years(2));
        assert_eq!(descriptor.years, 2);
        assert_eq!(descriptor.days + descriptor.weeks + descriptor.months, 0);
    }

    #[test]
    fn labels_and_parsing() {
        assert_eq!(Period::MONTHLY.label(), "Monthly");
        assert_eq!(Period::Weeks(2).label(), "Every 2 weeks");
        assert_eq!(Period::Months(3).to_string(), "3 months");
        assert_eq!(Period::Days(1).to_string(), "1 day");
        assert_eq!("1 month".parse::<Period>().unwrap(), Period::MONTHLY);
        assert_eq!("30 Days".parse::<Period>().unwrap(), Period::Days(30));
        assert!("monthly".parse::<Period>().is_err());
        assert!("2 fortnights".parse::<Period>().is_err());
    }
}
