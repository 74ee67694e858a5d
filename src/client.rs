//! HTTP client for the reservation data endpoint

use serde_json::Value;

use crate::{
    error::{FetchError, RecordError},
    models::reservation::ReservationRecord,
};

/// Records returned by one fetch, with the elements that failed to decode
#[derive(Debug, Default)]
pub struct FetchedRecords {
    pub records: Vec<ReservationRecord>,
    pub rejected: Vec<RecordError>,
}

#[derive(Clone)]
pub struct RecordsClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecordsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request every reservation record (`POST /api/data`)
    pub async fn fetch_all(&self) -> Result<FetchedRecords, FetchError> {
        let url = format!("{}/api/data", self.base_url);
        tracing::debug!(url = %url, "Fetching reservation records");

        let response = self.http.post(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        decode_records(payload)
    }
}

/// Decode a JSON array element by element so one bad record does not discard
/// the rest.
pub fn decode_records(payload: Value) -> Result<FetchedRecords, FetchError> {
    let Value::Array(items) = payload else {
        return Err(FetchError::Decode("expected a JSON array of records".to_string()));
    };

    let mut fetched = FetchedRecords::default();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<ReservationRecord>(item) {
            Ok(record) => fetched.records.push(record),
            Err(e) => fetched.rejected.push(RecordError::new(index, "record", e.to_string())),
        }
    }

    Ok(fetched)
}
