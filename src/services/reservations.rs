//! Reservations service

use std::sync::Arc;

use crate::{
    error::AppResult, models::reservation::ReservationRecord, repository::ReservationStore,
};

#[derive(Clone)]
pub struct ReservationsService {
    store: Arc<dyn ReservationStore>,
}

impl ReservationsService {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    /// Every stored reservation, unfiltered
    pub async fn list_all(&self) -> AppResult<Vec<ReservationRecord>> {
        let records = self.store.find_all().await?;
        tracing::debug!(count = records.len(), "Fetched all reservations");
        Ok(records)
    }

    /// Check the record store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
