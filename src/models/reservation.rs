//! Hotel reservation model

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// One booking as served by `POST /api/data` and consumed by the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    /// Arrival day (YYYY-MM-DD)
    #[serde(deserialize_with = "deserialize_arrival_date")]
    #[schema(value_type = String, format = Date)]
    pub arrival_date: NaiveDate,
    pub adults: u32,
    #[serde(default, deserialize_with = "deserialize_count_or_zero")]
    pub children: u32,
    #[serde(default, deserialize_with = "deserialize_count_or_zero")]
    pub babies: u32,
    /// Country code or free text, not validated
    pub country: String,
}

impl ReservationRecord {
    /// Adults, children and babies together
    pub fn total_visitors(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children) + u64::from(self.babies)
    }
}

/// Reservation ready to be written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub hotel_name: String,
    pub arrival_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    pub country: String,
}

/// Row of the `hotel_reservations` table
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: i64,
    pub hotel_name: String,
    pub arrival_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub babies: i32,
    pub country: String,
}

impl TryFrom<ReservationRow> for ReservationRecord {
    type Error = AppError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let count = |value: i32, field: &str| {
            u32::try_from(value).map_err(|_| {
                AppError::Internal(format!(
                    "reservation {} has a negative {} count ({})",
                    row.id, field, value
                ))
            })
        };

        Ok(Self {
            id: Some(row.id),
            adults: count(row.adults, "adults")?,
            children: count(row.children, "children")?,
            babies: count(row.babies, "babies")?,
            hotel_name: Some(row.hotel_name),
            arrival_date: row.arrival_date,
            country: row.country,
        })
    }
}

/// Parse a user or wire supplied date down to its calendar day.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Timestamps are converted to
/// the process-local time zone before the time of day is dropped.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Local).date_naive())
        })
}

fn deserialize_arrival_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid arrivalDate: {raw:?}")))
}

fn deserialize_count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}
