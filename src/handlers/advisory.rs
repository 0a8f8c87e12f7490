use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::{json_body, AppState};
use crate::{
    advisory::{AnalysisPayload, AnalyzeResponse, PrefillPayload, PrefillResponse},
    error::AppError,
};

/// Handle POST /api/ai/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalysisPayload>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let payload = json_body(body)?;
    let config = state.config.load();

    tracing::info!(
        model = %payload.model_key,
        level = %payload.affordability_level,
        "Handling analyze request"
    );

    let response = state.advisor.analyze(&config.advisor, &payload).await?;
    Ok(Json(response))
}

/// Handle POST /api/ai/prefill
pub async fn handle_prefill(
    State(state): State<AppState>,
    body: Result<Json<PrefillPayload>, JsonRejection>,
) -> Result<Json<PrefillResponse>, AppError> {
    let payload = json_body(body)?;
    let config = state.config.load();

    tracing::info!(
        model = %payload.model_key,
        year = payload.year,
        "Handling prefill request"
    );

    let response = state.advisor.prefill(&config.advisor, &payload).await?;
    Ok(Json(response))
}
