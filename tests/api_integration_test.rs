// API integration tests that verify HTTP endpoints
// Drives the Axum router directly against an in-memory database

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use climate_api::api::{create_router, generate_openapi_spec, AppState};
use climate_api::db::{MeasurementRepository, StationRepository};
use climate_api::services::ClimateService;
use http_body_util::BodyExt; // For `.collect()`
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt; // For `oneshot`

/// Helper to create test app over the sample dataset
async fn create_test_app() -> (axum::Router, SqlitePool) {
    let pool = common::test_pool().await;
    common::insert_sample_dataset(&pool).await;

    let climate_service = ClimateService::new(
        MeasurementRepository::new(pool.clone()),
        StationRepository::new(pool.clone()),
    );
    let router = create_router(AppState { climate_service });

    (router, pool)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<Value>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).ok())
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap()["status"], "healthy");
}

#[tokio::test]
async fn test_route_index_lists_routes() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    let paths: Vec<&str> = json["routes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/api/v1.0/precipitation"));
    assert!(paths.contains(&"/api/v1.0/stations"));
    assert!(paths.contains(&"/api/v1.0/tobs"));
    assert!(paths.contains(&"/api/v1.0/{start}/{end}"));
}

#[tokio::test]
async fn test_precipitation_endpoint() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    assert_eq!(json["2017-08-22"], 0.5);
    assert_eq!(json["2017-08-23"], 1.0);
}

#[tokio::test]
async fn test_stations_endpoint() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    let stations = json.as_array().unwrap();
    assert_eq!(stations.len(), 2);

    let kaneohe = stations
        .iter()
        .find(|s| s["station_id"] == "USC00513117")
        .unwrap();
    assert_eq!(kaneohe["name"], "KANEOHE 838.1, HI US");
    assert_eq!(kaneohe["elevation"], 14.6);
}

#[tokio::test]
async fn test_daily_mean_temperature_endpoints() {
    for uri in ["/api/v1.0/tobs", "/api/v1.0/temperature/daily-mean"] {
        let (app, _pool) = create_test_app().await;
        let (status, json) = get(app, uri).await;

        assert_eq!(status, StatusCode::OK, "{uri}");
        let json = json.unwrap();
        assert_eq!(json["2017-08-22"], 79.0);
        assert_eq!(json["2017-08-23"], 82.0);
    }
}

#[tokio::test]
async fn test_temperature_stats_query_endpoint() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(
        app,
        "/api/v1.0/temperature/stats?start=2017-08-22&end=2017-08-23",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert_eq!(json["minimum"], 78.0);
    assert_eq!(json["maximum"], 82.0);
    assert_eq!(json["average"], 80.0);
}

#[tokio::test]
async fn test_temperature_stats_query_open_ended() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/temperature/stats?start=2017-08-23").await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert_eq!(json["minimum"], 82.0);
    assert_eq!(json["maximum"], 82.0);
}

#[tokio::test]
async fn test_temperature_stats_missing_start_is_bad_request() {
    let (app, _pool) = create_test_app().await;
    let (status, _) = get(app, "/api/v1.0/temperature/stats?end=2017-08-23").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_path_endpoint() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/2017-08-22").await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert_eq!(json["minimum"], 78.0);
    assert_eq!(json["maximum"], 82.0);
    assert_eq!(json["average"], 80.0);
}

#[tokio::test]
async fn test_start_end_path_endpoint() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/2017-08-22/2017-08-22").await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert_eq!(json["minimum"], 78.0);
    assert_eq!(json["maximum"], 80.0);
    assert_eq!(json["average"], 79.0);
}

#[tokio::test]
async fn test_empty_range_returns_nulls() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/2018-01-01").await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert!(json["minimum"].is_null());
    assert!(json["maximum"].is_null());
    assert!(json["average"].is_null());
}

#[tokio::test]
async fn test_inverted_range_returns_nulls() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/2017-08-23/2017-08-22").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.unwrap()["average"].is_null());
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    for uri in [
        "/api/v1.0/not-a-date",
        "/api/v1.0/2017-08-22/08-23-2017",
        "/api/v1.0/temperature/stats?start=2017-02-30",
    ] {
        let (app, _pool) = create_test_app().await;
        let (status, _) = get(app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_dataset_endpoint() {
    let (app, _pool) = create_test_app().await;
    let (status, json) = get(app, "/api/v1.0/dataset").await;

    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert_eq!(json["earliest_date"], "2017-08-22");
    assert_eq!(json["latest_date"], "2017-08-23");
    assert_eq!(json["station_count"], 2);
}

#[test]
fn test_openapi_spec_lists_routes() {
    let spec = serde_json::to_value(generate_openapi_spec()).unwrap();
    let paths = spec["paths"].as_object().unwrap();

    assert!(paths.contains_key("/api/v1.0/precipitation"));
    assert!(paths.contains_key("/api/v1.0/stations"));
    assert!(paths.contains_key("/api/v1.0/temperature/stats"));
    assert!(paths.contains_key("/api/v1.0/{start}/{end}"));
}
