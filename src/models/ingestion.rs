//! Ingestion report and status models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RecordError;

/// Outcome of one CSV load.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngestionReport {
    /// Path of the loaded file
    pub source: String,
    /// Data rows found in the file (header excluded)
    pub total_rows: usize,
    /// Rows written to the store
    pub inserted: u64,
    /// Rows rejected by validation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RecordError>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Where the startup ingestion currently stands, reported by `GET /api/ready`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IngestionStatus {
    Disabled,
    Pending,
    Running {
        source: String,
        started_at: DateTime<Utc>,
    },
    /// The store already held reservations
    Skipped {
        existing: i64,
    },
    Completed {
        report: IngestionReport,
    },
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
    },
}
