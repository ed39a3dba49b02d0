// =============================================================================
// REST API Endpoints: Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The service is a thin shell around the
// pure engine: callers POST an already-fetched OHLC series and get back either
// a prediction or chart overlays. No storage, no upstream fetching.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::app_state::AppState;
use crate::overlay::{build_overlays, OverlaySelection};
use crate::prediction_envelope::PredictionEnvelope;
use crate::signals;
use crate::types::OhlcSeries;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/predict", post(predict))
        .route("/api/v1/overlays", post(overlays))
        .route("/api/v1/predictions", get(recent_predictions))
        .route("/api/v1/config", get(config))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Prediction
// =============================================================================

#[derive(Deserialize)]
struct PredictRequest {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(flatten)]
    series: OhlcSeries,
}

async fn predict(State(state): State<Arc<AppState>>, Json(req): Json<PredictRequest>) -> impl IntoResponse {
    let (window, default_currency) = {
        let config = state.config.read();
        (config.history_window, config.default_currency.clone())
    };

    let series = req.series.tail(window);
    let currency = req
        .currency
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(default_currency);

    let prediction = signals::predict(&series, &currency);
    let envelope = PredictionEnvelope::new(req.symbol, series.len(), prediction);

    info!(
        id = %envelope.id,
        symbol = envelope.symbol.as_deref().unwrap_or("-"),
        bars = envelope.bars_used,
        trend = %envelope.prediction.trend,
        confidence = envelope.prediction.confidence,
        "prediction served"
    );

    state.push_prediction(envelope.clone());
    Json(envelope)
}

async fn recent_predictions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.recent_predictions())
}

// =============================================================================
// Chart overlays
// =============================================================================

#[derive(Deserialize)]
struct OverlayRequest {
    #[serde(default)]
    indicators: Option<OverlaySelection>,
    #[serde(flatten)]
    series: OhlcSeries,
}

async fn overlays(State(state): State<Arc<AppState>>, Json(req): Json<OverlayRequest>) -> impl IntoResponse {
    let (selection, params) = {
        let config = state.config.read();
        (
            req.indicators.unwrap_or(config.default_overlays),
            config.overlay_params.clone(),
        )
    };

    let overlays = build_overlays(&req.series, &selection, &params);
    info!(bars = overlays.bars, selection = ?selection, "overlays served");
    Json(overlays)
}

// =============================================================================
// Configuration (read-only)
// =============================================================================

async fn config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.config.read().clone())
}
