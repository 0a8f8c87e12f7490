use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "car-cost-advisor",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
///
/// The calculator is always ready; the advisor flag tells clients whether
/// the `/api/ai/*` routes can succeed.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config.load();
    (StatusCode::OK, Json(json!({
        "status": "ready",
        "service": "car-cost-advisor",
        "advisor": config.advisor.is_usable(),
        "snapshots": state.snapshots.len(),
    })))
}
