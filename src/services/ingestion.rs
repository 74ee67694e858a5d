//! Startup CSV ingestion
//!
//! Reads the hotel bookings export once, maps each row into a reservation and
//! bulk-inserts the valid ones. Rows that fail validation are reported with
//! their position and do not stop the load. Any failure is logged and kept in
//! the ingestion status; it never brings the server down.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tokio::{sync::RwLock, task::JoinHandle};

use crate::{
    config::IngestionConfig,
    error::{IngestionError, RecordError},
    models::{
        ingestion::{IngestionReport, IngestionStatus},
        reservation::NewReservation,
    },
    repository::ReservationStore,
};

/// Columns that must be present in the header row. `children` and `babies`
/// are optional and default to zero.
const REQUIRED_COLUMNS: [&str; 6] = [
    "hotel",
    "arrival_date_year",
    "arrival_date_month",
    "arrival_date_day_of_month",
    "adults",
    "country",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Zero-based month index for a full English month name
pub fn month_index(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|month| month.eq_ignore_ascii_case(name))
        .map(|i| i as u32)
}

#[derive(Debug, Deserialize)]
struct BookingRow {
    hotel: String,
    arrival_date_year: String,
    arrival_date_month: String,
    arrival_date_day_of_month: String,
    adults: String,
    #[serde(default)]
    children: String,
    #[serde(default)]
    babies: String,
    country: String,
}

impl BookingRow {
    fn into_reservation(self, index: usize) -> Result<NewReservation, RecordError> {
        let hotel_name = required_text(index, "hotel", self.hotel)?;
        let year: i32 = parse_number(index, "arrival_date_year", &self.arrival_date_year)?;
        let month = month_index(&self.arrival_date_month).ok_or_else(|| {
            RecordError::new(
                index,
                "arrival_date_month",
                format!("unknown month name: {:?}", self.arrival_date_month),
            )
        })?;
        let day: u32 = parse_number(index, "arrival_date_day_of_month", &self.arrival_date_day_of_month)?;
        let arrival_date = NaiveDate::from_ymd_opt(year, month + 1, day).ok_or_else(|| {
            RecordError::new(
                index,
                "arrival_date",
                format!("no such date: {} {} {}", day, self.arrival_date_month.trim(), year),
            )
        })?;

        Ok(NewReservation {
            hotel_name,
            arrival_date,
            adults: parse_count(index, "adults", &self.adults)?,
            children: parse_optional_count(index, "children", &self.children)?,
            babies: parse_optional_count(index, "babies", &self.babies)?,
            country: required_text(index, "country", self.country)?,
        })
    }
}

fn required_text(index: usize, field: &str, value: String) -> Result<String, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::new(index, field, "value is missing"));
    }
    Ok(trimmed.to_string())
}

fn parse_number<T: std::str::FromStr>(index: usize, field: &str, value: &str) -> Result<T, RecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordError::new(index, field, format!("not a number: {:?}", value)))
}

fn parse_count(index: usize, field: &str, value: &str) -> Result<u32, RecordError> {
    let count: u32 = parse_number(index, field, value)?;
    if count > i32::MAX as u32 {
        return Err(RecordError::new(index, field, format!("count {} is too large", count)));
    }
    Ok(count)
}

/// Empty and `NA` cells count as zero
fn parse_optional_count(index: usize, field: &str, value: &str) -> Result<u32, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NA") {
        return Ok(0);
    }
    parse_count(index, field, trimmed)
}

/// Result of mapping a CSV export into reservations
#[derive(Debug, Default)]
pub struct ParsedBookings {
    pub reservations: Vec<NewReservation>,
    pub rejected: Vec<RecordError>,
    /// Data rows seen, valid or not
    pub total_rows: usize,
}

/// Parse CSV bytes into reservations, collecting per-row errors.
pub fn parse_bookings(data: &[u8]) -> Result<ParsedBookings, IngestionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h.trim() == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestionError::MissingColumns(missing));
    }

    let mut parsed = ParsedBookings::default();
    for (index, result) in reader.deserialize::<BookingRow>().enumerate() {
        parsed.total_rows += 1;
        let reservation = result
            .map_err(|e| RecordError::new(index, "csv_row", format!("CSV parse error: {e}")))
            .and_then(|row| row.into_reservation(index));

        match reservation {
            Ok(reservation) => parsed.reservations.push(reservation),
            Err(err) => parsed.rejected.push(err),
        }
    }

    Ok(parsed)
}

#[derive(Clone)]
pub struct IngestionService {
    store: Arc<dyn ReservationStore>,
    config: IngestionConfig,
    status: Arc<RwLock<IngestionStatus>>,
}

impl IngestionService {
    pub fn new(store: Arc<dyn ReservationStore>, config: IngestionConfig) -> Self {
        let initial = if config.enabled {
            IngestionStatus::Pending
        } else {
            IngestionStatus::Disabled
        };

        Self {
            store,
            config,
            status: Arc::new(RwLock::new(initial)),
        }
    }

    /// Run the startup load in the background. `None` when ingestion is
    /// disabled.
    pub fn spawn(&self) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            return None;
        }

        let service = self.clone();
        Some(tokio::spawn(async move {
            // Already logged and recorded in the status by `run`
            if let Err(err) = service.run().await {
                tracing::debug!(error = %err, "Startup ingestion did not complete");
            }
        }))
    }

    pub async fn status(&self) -> IngestionStatus {
        self.status.read().await.clone()
    }

    async fn set_status(&self, status: IngestionStatus) {
        *self.status.write().await = status;
    }

    /// Load the configured CSV file into the store.
    ///
    /// Returns `Ok(None)` when the load was skipped because the store already
    /// holds reservations.
    pub async fn run(&self) -> Result<Option<IngestionReport>, IngestionError> {
        let source = self.config.csv_path.clone();
        self.set_status(IngestionStatus::Running {
            source: source.clone(),
            started_at: Utc::now(),
        })
        .await;
        tracing::info!(source = %source, "Starting reservation ingestion");

        let result = self.load(&source).await;
        match &result {
            Ok(Some(report)) => {
                tracing::info!(
                    source = %source,
                    total_rows = report.total_rows,
                    inserted = report.inserted,
                    rejected = report.rejected.len(),
                    "Reservation ingestion completed"
                );
                self.set_status(IngestionStatus::Completed {
                    report: report.clone(),
                })
                .await;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::error!(source = %source, error = %err, "Reservation ingestion failed");
                self.set_status(IngestionStatus::Failed {
                    error: err.to_string(),
                    failed_at: Utc::now(),
                })
                .await;
            }
        }

        result
    }

    async fn load(&self, source: &str) -> Result<Option<IngestionReport>, IngestionError> {
        if self.config.skip_if_populated {
            let existing = self.store.count().await?;
            if existing > 0 {
                tracing::info!(existing, "Reservations already loaded, skipping ingestion");
                self.set_status(IngestionStatus::Skipped { existing }).await;
                return Ok(None);
            }
        }

        let data = tokio::fs::read(source)
            .await
            .map_err(|e| IngestionError::Read {
                path: source.to_string(),
                source: e,
            })?;

        self.ingest_bytes(source, &data).await.map(Some)
    }

    /// Parse CSV bytes and insert the valid rows. The whole load is one
    /// transaction: either every valid row is stored or none is.
    pub async fn ingest_bytes(&self, source: &str, data: &[u8]) -> Result<IngestionReport, IngestionError> {
        let started_at = Utc::now();
        let parsed = parse_bookings(data)?;

        for rejected in &parsed.rejected {
            tracing::debug!(source = %source, %rejected, "Rejected reservation row");
        }
        if !parsed.rejected.is_empty() {
            tracing::warn!(
                source = %source,
                rejected = parsed.rejected.len(),
                "Some reservation rows failed validation"
            );
        }

        let inserted = self
            .store
            .insert_all(&parsed.reservations, self.config.batch_size)
            .await?;

        Ok(IngestionReport {
            source: source.to_string(),
            total_rows: parsed.total_rows,
            inserted,
            rejected: parsed.rejected,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
