//! Client and dashboard session tests against a mock HTTP server

use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use hotel_dashboard::{
    client::RecordsClient, dashboard::DashboardSession, error::FetchError,
};

use crate::support::date;

async fn server_with(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/data"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn sample_payload() -> serde_json::Value {
    json!([
        { "_id": "64b0", "hotelName": "Resort Hotel", "adults": 2, "children": 1, "babies": 0, "arrivalDate": "2023-07-01", "country": "PT" },
        { "adults": 1, "arrivalDate": "2023-07-01", "country": "PT" },
        { "adults": 3, "children": 2, "babies": 1, "arrivalDate": "2023-07-02", "country": "FR" }
    ])
}

#[tokio::test]
async fn test_load_aggregates_fetched_records() {
    let server = server_with(ResponseTemplate::new(200).set_body_json(sample_payload())).await;
    let client = RecordsClient::new(server.uri()).unwrap();

    let mut session = DashboardSession::new();
    session.load(&client).await.unwrap();

    assert_eq!(session.records().len(), 3);
    assert!(session.rejected().is_empty());

    let series = session.series();
    let total: Vec<_> = series.total.iter().map(|p| (p.date, p.value)).collect();
    assert_eq!(total, vec![(date(2023, 7, 1), 4), (date(2023, 7, 2), 6)]);
    let adults: Vec<_> = series.adults.iter().map(|p| p.value).collect();
    assert_eq!(adults, vec![3, 3]);
    let countries: Vec<_> = series
        .by_country
        .iter()
        .map(|p| (p.category.as_str(), p.value))
        .collect();
    assert_eq!(countries, vec![("PT", 4), ("FR", 6)]);
}

#[tokio::test]
async fn test_load_then_filter() {
    let server = server_with(ResponseTemplate::new(200).set_body_json(sample_payload())).await;
    let client = RecordsClient::new(server.uri()).unwrap();

    let mut session = DashboardSession::new();
    session.load(&client).await.unwrap();
    let series = session.apply_filter("2023-07-02", "2023-07-02").unwrap();

    assert_eq!(series.by_country.len(), 1);
    assert_eq!(series.by_country[0].category, "FR");
    assert_eq!(series.by_country[0].value, 6);
}

#[tokio::test]
async fn test_malformed_record_does_not_discard_batch() {
    let payload = json!([
        { "adults": 2, "arrivalDate": "2023-07-01", "country": "PT" },
        { "adults": -4, "arrivalDate": "2023-07-01", "country": "PT" },
        { "adults": 1, "arrivalDate": "2023-07-03", "country": "GB" }
    ]);
    let server = server_with(ResponseTemplate::new(200).set_body_json(payload)).await;
    let client = RecordsClient::new(server.uri()).unwrap();

    let mut session = DashboardSession::new();
    session.load(&client).await.unwrap();

    assert_eq!(session.records().len(), 2);
    assert_eq!(session.rejected().len(), 1);
    assert_eq!(session.rejected()[0].index, 1);
    assert_eq!(session.series().visitor_count(), 3);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_state() {
    let good = server_with(ResponseTemplate::new(200).set_body_json(sample_payload())).await;
    let broken = server_with(ResponseTemplate::new(500).set_body_string("boom")).await;

    let mut session = DashboardSession::new();
    session.load(&RecordsClient::new(good.uri()).unwrap()).await.unwrap();
    let before = session.series().clone();

    let result = session.load(&RecordsClient::new(broken.uri()).unwrap()).await;

    assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
    assert_eq!(session.series(), &before);
    assert_eq!(session.records().len(), 3);
    assert!(session.last_error().is_some());
}

#[tokio::test]
async fn test_non_array_payload_is_a_fetch_error() {
    let server = server_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "nope" }))).await;
    let client = RecordsClient::new(server.uri()).unwrap();

    let mut session = DashboardSession::new();
    let result = session.load(&client).await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
    assert!(session.series().is_empty());
}
