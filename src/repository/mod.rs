//! Repository layer for database operations

pub mod reservations;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::reservation::{NewReservation, ReservationRecord},
};

/// Durable collection of reservation records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert all records in one transaction, `batch_size` rows per
    /// statement. Returns the number written; on error nothing is written.
    async fn insert_all(&self, records: &[NewReservation], batch_size: usize) -> AppResult<u64>;

    /// Return every stored record
    async fn find_all(&self) -> AppResult<Vec<ReservationRecord>>;

    async fn count(&self) -> AppResult<i64>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct, one repository per table
#[derive(Clone)]
pub struct Repository {
    pub reservations: reservations::ReservationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            reservations: reservations::ReservationsRepository::new(pool),
        }
    }
}
