//! Router tests against an in-memory record store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use hotel_dashboard::{
    client::decode_records,
    config::IngestionConfig,
    error::ErrorResponse,
    models::reservation::ReservationRecord,
    services::{aggregation::aggregate, range_filter::DateRange},
};

use crate::support::{app_with_store, date, disabled_ingestion, sample_records, InMemoryStore};

const BOOKINGS_CSV: &str = "hotel,arrival_date_year,arrival_date_month,arrival_date_day_of_month,adults,children,babies,country\n\
    Resort Hotel,2023,July,1,2,1,0,PT\n\
    Resort Hotel,2023,July,1,1,NA,0,PT\n\
    City Hotel,2023,July,2,3,2,1,FR\n\
    City Hotel,2023,Julember,2,3,2,1,FR\n";

async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_fetch_all_returns_every_record() {
    let store = Arc::new(InMemoryStore::with_records(sample_records()));
    let (app, _) = app_with_store(store, disabled_ingestion());

    let (status, body) = send(app, "POST", "/api/data").await;

    assert_eq!(status, StatusCode::OK);
    let records: Vec<ReservationRecord> = serde_json::from_slice(&body).unwrap();
    assert_eq!(records, sample_records());

    let raw: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(raw[0]["arrivalDate"], "2023-07-01");
    assert_eq!(raw[0]["hotelName"], "Resort Hotel");
}

#[tokio::test]
async fn test_fetch_all_on_empty_store() {
    let (app, _) = app_with_store(Arc::new(InMemoryStore::default()), disabled_ingestion());

    let (status, body) = send(app, "POST", "/api/data").await;

    assert_eq!(status, StatusCode::OK);
    let records: Vec<ReservationRecord> = serde_json::from_slice(&body).unwrap();
    assert!(records.is_empty());
    assert!(aggregate(&records).is_empty());
}

#[tokio::test]
async fn test_fetch_all_reports_store_failure() {
    let (app, _) = app_with_store(Arc::new(InMemoryStore::unavailable()), disabled_ingestion());

    let (status, body) = send(app, "POST", "/api/data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "DbFailure");
    assert_eq!(error.message, "Database error");
}

#[tokio::test]
async fn test_fetch_endpoint_only_accepts_post() {
    let (app, _) = app_with_store(Arc::new(InMemoryStore::default()), disabled_ingestion());

    let (status, _) = send(app, "GET", "/api/data").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = app_with_store(Arc::new(InMemoryStore::default()), disabled_ingestion());

    let (status, body) = send(app, "GET", "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_store_and_ingestion() {
    let (app, _) = app_with_store(Arc::new(InMemoryStore::default()), disabled_ingestion());
    let (status, body) = send(app, "GET", "/api/ready").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["database"], "up");
    assert_eq!(body["ingestion"]["state"], "disabled");

    let (app, _) = app_with_store(Arc::new(InMemoryStore::unavailable()), disabled_ingestion());
    let (status, body) = send(app, "GET", "/api/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_ingested_csv_is_served_and_aggregated() {
    let store = Arc::new(InMemoryStore::default());
    let ingestion = IngestionConfig {
        enabled: true,
        csv_path: "bookings.csv".to_string(),
        batch_size: 2,
        skip_if_populated: true,
    };
    let (app, state) = app_with_store(store, ingestion);

    let report = state
        .services
        .ingestion
        .ingest_bytes("bookings.csv", BOOKINGS_CSV.as_bytes())
        .await
        .unwrap();
    assert_eq!(report.inserted, 3);
    assert_eq!(report.rejected.len(), 1);

    let (status, body) = send(app, "POST", "/api/data").await;
    assert_eq!(status, StatusCode::OK);

    let fetched = decode_records(serde_json::from_slice(&body).unwrap()).unwrap();
    assert!(fetched.rejected.is_empty());

    let series = aggregate(&fetched.records);
    let daily: Vec<_> = series.daily.iter().map(|p| (p.date, p.value)).collect();
    assert_eq!(daily, vec![(date(2023, 7, 1), 4), (date(2023, 7, 2), 6)]);

    let range = DateRange::parse("2023-07-02", "2023-07-02").unwrap();
    let filtered = aggregate(range.filter(&fetched.records));
    assert_eq!(filtered.by_country.len(), 1);
    assert_eq!(filtered.by_country[0].category, "FR");
    assert_eq!(filtered.by_country[0].value, 6);
}

#[tokio::test]
async fn test_failed_startup_load_leaves_store_empty_and_is_retried() {
    let path = std::env::temp_dir().join(format!(
        "hotel-bookings-router-{}.csv",
        std::process::id()
    ));
    tokio::fs::write(&path, BOOKINGS_CSV).await.unwrap();

    let store = Arc::new(InMemoryStore::failing_on_batch(1));
    let ingestion = IngestionConfig {
        enabled: true,
        csv_path: path.to_string_lossy().into_owned(),
        batch_size: 2,
        skip_if_populated: true,
    };
    let (app, state) = app_with_store(store.clone(), ingestion);

    assert!(state.services.ingestion.run().await.is_err());
    assert_eq!(store.stored_count(), 0);

    let report = state
        .services
        .ingestion
        .run()
        .await
        .unwrap()
        .expect("an empty store is loaded again");
    assert_eq!(report.inserted, 3);
    assert_eq!(store.stored_count(), 3);

    let (status, body) = send(app, "GET", "/api/ready").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["ingestion"]["state"], "completed");
    assert_eq!(body["ingestion"]["report"]["inserted"], 3);

    tokio::fs::remove_file(&path).await.unwrap();
}
