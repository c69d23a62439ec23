//! Integration tests for the API server
//!
//! Tests HTTP endpoints, error mapping, and the analysis pipeline behind
//! the analyze endpoint.


use chrono::Utc;
use serde_json::Value;

use darvas::models::candle::Candle;
use test_utils::{breakout_candles, StubResponse, TestApiServer};

#[tokio::test]
async fn root_reports_active_service() {
    let app = TestApiServer::new();
    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["message"], "Darvas Box Trading API");
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new();
    let response = app.server.get("/api/v1/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "darvas-box-api");
    assert!(body["uptime_seconds"].as_u64().is_some());
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new();
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("http_requests_in_flight"),
        "Expected http_requests_in_flight metric"
    );
}

#[tokio::test]
async fn analyze_returns_full_result_with_uppercased_symbol() {
    let app = TestApiServer::new();
    let response = app.server.get("/api/v1/analyze").add_query_param("symbol", "aapl").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["price"], 111.0);
    assert_eq!(body["box_high"], 110.0);
    assert_eq!(body["box_low"], 90.0);
    assert_eq!(body["signal"], "BUY");
    assert_eq!(body["volume"], 5000);
    assert_eq!(body["change"], 6.0);
    assert_eq!(body["change_percent"], 5.71);
    assert_eq!(body["volume_avg_20"], 1200);
}

#[tokio::test]
async fn analyze_is_deterministic_across_requests() {
    let app = TestApiServer::new();
    let first = app.server.get("/api/v1/analyze").add_query_param("symbol", "TCS.NS").await;
    let second = app.server.get("/api/v1/analyze").add_query_param("symbol", "TCS.NS").await;

    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);
    assert_eq!(first.text(), second.text());
}

#[tokio::test]
async fn analyze_maps_missing_symbol_data_to_not_found() {
    let app = TestApiServer::with_response(StubResponse::NotFound);
    let response = app.server.get("/api/v1/analyze").add_query_param("symbol", "NOPE").await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert_eq!(body["detail"], "no data found for symbol: NOPE");
}

#[tokio::test]
async fn analyze_maps_empty_history_to_not_found() {
    let app = TestApiServer::with_response(StubResponse::Candles(Vec::new()));
    let response = app.server.get("/api/v1/analyze").add_query_param("symbol", "EMPTY").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn analyze_maps_upstream_failure_to_bad_gateway() {
    let app = TestApiServer::with_response(StubResponse::Upstream);
    let response = app.server.get("/api/v1/analyze").add_query_param("symbol", "AAPL").await;
    assert_eq!(response.status_code(), 502);

    let body: Value = response.json();
    assert_eq!(body["detail"], "market data provider unavailable");
}

#[tokio::test]
async fn analyze_rejects_insufficient_history_as_client_error() {
    let few: Vec<Candle> = (0..10)
        .map(|_| Candle::new(100.0, 101.0, 99.0, 100.0, 1000, Utc::now()))
        .collect();
    let app = TestApiServer::with_response(StubResponse::Candles(few));

    let response = app.server.get("/api/v1/analyze").add_query_param("symbol", "THIN").await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .contains("not enough data for analysis"),
        "unexpected detail: {}",
        body["detail"]
    );
}

#[tokio::test]
async fn analyze_rejects_blank_symbol() {
    let app = TestApiServer::new();
    let response = app.server.get("/api/v1/analyze").add_query_param("symbol", "  ").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn analyze_requires_symbol_parameter() {
    let app = TestApiServer::new();
    let response = app.server.get("/api/v1/analyze").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn analyze_reports_sell_on_breakdown() {
    let mut candles = breakout_candles();
    candles[29].close = 85.0;
    candles[29].volume = 10;
    let app = TestApiServer::with_response(StubResponse::Candles(candles));

    let response = app.server.get("/api/v1/analyze").add_query_param("symbol", "DOWN").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["signal"], "SELL");
}

#[tokio::test]
async fn analyze_serializes_absent_box_as_null() {
    let candles: Vec<Candle> = (0..30)
        .map(|i| {
            let base = 100.0 + i as f64;
            Candle::new(base, base + 1.0, base - 1.0, base, 1000, Utc::now())
        })
        .collect();
    let app = TestApiServer::with_response(StubResponse::Candles(candles));

    let response = app.server.get("/api/v1/analyze").add_query_param("symbol", "MONO").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert!(body["box_high"].is_null());
    assert!(body["box_low"].is_null());
    assert_eq!(body["signal"], "IGNORE");
}
