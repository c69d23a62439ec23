//! HTTP endpoint server using Axum.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::metrics::Metrics;
use crate::models::analysis::BoxAnalysis;
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::signals::engine::{analyze, BoxParams};

pub const SERVICE_NAME: &str = "darvas-box-api";

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MarketDataProvider>,
    pub params: BoxParams,
    pub lookback_days: u32,
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Darvas Box Trading API",
        "status": "active"
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    symbol: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    symbol: String,
    #[serde(flatten)]
    analysis: BoxAnalysis,
}

type ErrorResponse = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, detail: impl Into<String>) -> ErrorResponse {
    (status, Json(json!({ "detail": detail.into() })))
}

/// Analyze a symbol with the Darvas Box strategy.
///
/// Error mapping: blank symbol or insufficient history is a client error
/// (400), a symbol the provider has never heard of is 404, and any other
/// provider failure is an upstream error (502).
async fn analyze_symbol(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<AnalyzeResponse>, ErrorResponse> {
    let symbol = query.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "symbol must not be empty",
        ));
    }

    let candles = state
        .provider
        .daily_history(&symbol, state.lookback_days)
        .await
        .map_err(|e| match e {
            MarketDataError::NoData { .. } => error_response(
                StatusCode::NOT_FOUND,
                format!("no data found for symbol: {}", symbol),
            ),
            other => {
                error!(error = %other, symbol = %symbol, "market data fetch failed");
                error_response(StatusCode::BAD_GATEWAY, "market data provider unavailable")
            }
        })?;

    if candles.is_empty() {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("no data found for symbol: {}", symbol),
        ));
    }

    let analysis = analyze(&candles, &state.params)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    info!(symbol = %symbol, signal = ?analysis.signal, "analysis complete");

    Ok(Json(AnalyzeResponse { symbol, analysis }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/analyze", get(analyze_symbol))
        .route("/api/v1/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
