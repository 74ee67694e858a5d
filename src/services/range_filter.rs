//! Inclusive date-window filtering of reservations
//!
//! Filtering works on calendar days, the same granularity the aggregation
//! buckets by.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::reservation::{parse_calendar_date, ReservationRecord},
};

/// Inclusive `[start, end]` window of arrival days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidDateRange(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse the two boundary strings entered by the user.
    ///
    /// Both must be present and parse as `YYYY-MM-DD` or RFC 3339.
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        let start = parse_boundary("start", start)?;
        let end = parse_boundary("end", end)?;
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Records whose arrival day falls inside the window, in input order
    pub fn filter<'a, I>(self, records: I) -> impl Iterator<Item = &'a ReservationRecord>
    where
        I: IntoIterator<Item = &'a ReservationRecord>,
    {
        records
            .into_iter()
            .filter(move |record| self.contains(record.arrival_date))
    }
}

fn parse_boundary(name: &str, value: &str) -> AppResult<NaiveDate> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidDateRange(format!("{} date is empty", name)));
    }
    parse_calendar_date(value).ok_or_else(|| {
        AppError::InvalidDateRange(format!("{} date is not a valid date: {:?}", name, value))
    })
}
