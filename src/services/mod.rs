//! Business logic services

pub mod aggregation;
pub mod ingestion;
pub mod range_filter;
pub mod reservations;

use std::sync::Arc;

use crate::{
    config::IngestionConfig,
    repository::{ReservationStore, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub reservations: reservations::ReservationsService,
    pub ingestion: ingestion::IngestionService,
}

impl Services {
    /// Create all services backed by the Postgres repository
    pub fn new(repository: Repository, ingestion_config: IngestionConfig) -> Self {
        Self::with_store(Arc::new(repository.reservations), ingestion_config)
    }

    /// Create all services on top of any record store
    pub fn with_store(store: Arc<dyn ReservationStore>, ingestion_config: IngestionConfig) -> Self {
        Self {
            reservations: reservations::ReservationsService::new(store.clone()),
            ingestion: ingestion::IngestionService::new(store, ingestion_config),
        }
    }
}
