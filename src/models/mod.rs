//! Data models for the hotel dashboard

pub mod ingestion;
pub mod reservation;
pub mod series;

// Re-export commonly used types
pub use ingestion::{IngestionReport, IngestionStatus};
pub use reservation::{NewReservation, ReservationRecord};
pub use series::{CategoryPoint, DatedPoint, VisitorSeries};
