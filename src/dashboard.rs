//! Dashboard session state
//!
//! Holds the records fetched once per session and the series currently on
//! display. Applying a date range re-runs the aggregation over the matching
//! records and replaces the displayed series.

use crate::{
    client::RecordsClient,
    error::{AppResult, FetchError, RecordError},
    models::{reservation::ReservationRecord, series::VisitorSeries},
    services::{aggregation::aggregate, range_filter::DateRange},
};

#[derive(Debug, Default)]
pub struct DashboardSession {
    records: Vec<ReservationRecord>,
    rejected: Vec<RecordError>,
    range: Option<DateRange>,
    series: VisitorSeries,
    last_error: Option<String>,
}

impl DashboardSession {
    /// A session with nothing loaded yet: every series is empty
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ReservationRecord>) -> Self {
        let series = aggregate(&records);
        Self {
            records,
            series,
            ..Self::default()
        }
    }

    /// Fetch all records and show the unfiltered series.
    ///
    /// On failure the previously loaded records and series stay in place and
    /// the error is kept in `last_error`.
    pub async fn load(&mut self, client: &RecordsClient) -> Result<(), FetchError> {
        match client.fetch_all().await {
            Ok(fetched) => {
                if !fetched.rejected.is_empty() {
                    tracing::warn!(
                        rejected = fetched.rejected.len(),
                        "Some reservation records could not be decoded"
                    );
                }
                tracing::info!(records = fetched.records.len(), "Loaded reservation records");

                self.series = aggregate(&fetched.records);
                self.records = fetched.records;
                self.rejected = fetched.rejected;
                self.range = None;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch reservation records");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Narrow the display to `[start, end]`. An invalid range leaves the
    /// current series untouched.
    pub fn apply_filter(&mut self, start: &str, end: &str) -> AppResult<&VisitorSeries> {
        let range = DateRange::parse(start, end)?;
        self.series = aggregate(range.filter(&self.records));
        self.range = Some(range);
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            days = self.series.daily.len(),
            "Applied date filter"
        );
        Ok(&self.series)
    }

    /// Show the series over every loaded record again
    pub fn clear_filter(&mut self) -> &VisitorSeries {
        self.series = aggregate(&self.records);
        self.range = None;
        &self.series
    }

    pub fn series(&self) -> &VisitorSeries {
        &self.series
    }

    pub fn records(&self) -> &[ReservationRecord] {
        &self.records
    }

    pub fn rejected(&self) -> &[RecordError] {
        &self.rejected
    }

    pub fn active_range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
