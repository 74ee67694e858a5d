//! Chart series produced by visitor aggregation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summed value for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedPoint {
    pub date: NaiveDate,
    pub value: u64,
}

/// Summed value for one category (country)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub category: String,
    pub value: u64,
}

/// The five series shown on the dashboard.
///
/// Day-keyed series are in ascending date order. `by_country` keeps the order
/// in which countries were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorSeries {
    /// Visitors per day (time series chart)
    pub daily: Vec<DatedPoint>,
    /// Visitors per day (total visitors sparkline), same values as `daily`
    pub total: Vec<DatedPoint>,
    /// Adults per day
    pub adults: Vec<DatedPoint>,
    /// Children per day
    pub children: Vec<DatedPoint>,
    /// Visitors per country
    pub by_country: Vec<CategoryPoint>,
}

impl VisitorSeries {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.by_country.is_empty()
    }

    /// Sum of all visitors across the daily series
    pub fn visitor_count(&self) -> u64 {
        self.daily.iter().map(|p| p.value).sum()
    }
}
