//! Pay period model.
//!
//! A [`PayPeriod`] is the inclusive date window a payroll record covers.
//! Periods are usually whole calendar months and render as the compact
//! `"YYYY-MM"` bucket form; arbitrary windows render as `"start..end"`.
//! Parsing accepts both, which is how legacy month-bucket data is
//! normalized during import.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// An inclusive pay period window.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
///
/// let period: PayPeriod = "2026-01".parse().unwrap();
/// assert_eq!(period.day_count(), 31);
/// assert_eq!(period.to_string(), "2026-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a period covering one whole calendar month.
    ///
    /// Returns `InvalidInput` if the year/month combination is not a
    /// valid calendar month.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let start_date =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::InvalidInput {
                field: "period".to_string(),
                message: format!("{year:04}-{month:02} is not a valid calendar month"),
            })?;
        // Last day of the month: first of next month minus one day.
        let end_date = start_date + Months::new(1) - Days::new(1);
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Creates a period from explicit start and end dates.
    ///
    /// Returns `InvalidInput` when the end date precedes the start date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidInput {
                field: "period".to_string(),
                message: format!("end date {end_date} precedes start date {start_date}"),
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Returns the inclusive number of calendar days in the period.
    pub fn day_count(&self) -> u32 {
        (self.end_date - self.start_date).num_days() as u32 + 1
    }

    /// Returns true if the period is exactly one whole calendar month.
    pub fn is_calendar_month(&self) -> bool {
        let first = self.start_date.day() == 1;
        let same_month = self.start_date.year() == self.end_date.year()
            && self.start_date.month() == self.end_date.month();
        let last = self.end_date + Days::new(1) == self.start_date + Months::new(1);
        first && same_month && last
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_calendar_month() {
            write!(
                f,
                "{:04}-{:02}",
                self.start_date.year(),
                self.start_date.month()
            )
        } else {
            write!(f, "{}..{}", self.start_date, self.end_date)
        }
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((start, end)) = s.split_once("..") {
            let start_date = parse_date("period", start)?;
            let end_date = parse_date("period", end)?;
            return Self::new(start_date, end_date);
        }
        // Legacy month bucket: "YYYY-MM".
        let (year, month) = s.split_once('-').ok_or_else(|| invalid_period(s))?;
        let year: i32 = year.parse().map_err(|_| invalid_period(s))?;
        let month: u32 = month.parse().map_err(|_| invalid_period(s))?;
        Self::month(year, month)
    }
}

fn parse_date(field: &str, s: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| EngineError::InvalidInput {
        field: field.to_string(),
        message: format!("'{s}' is not a valid date (expected YYYY-MM-DD)"),
    })
}

fn invalid_period(s: &str) -> EngineError {
    EngineError::InvalidInput {
        field: "period".to_string(),
        message: format!("'{s}' is not a valid pay period (expected YYYY-MM or start..end)"),
    }
}

impl Serialize for PayPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PayPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
