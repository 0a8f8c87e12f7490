use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::{json_body, AppState};
use crate::{
    error::AppError,
    snapshots::{NewSnapshot, Snapshot},
};

/// Handle GET /api/snapshots
pub async fn list_snapshots(State(state): State<AppState>) -> Json<Vec<Snapshot>> {
    Json(state.snapshots.list())
}

/// Handle POST /api/snapshots
pub async fn save_snapshot(
    State(state): State<AppState>,
    body: Result<Json<NewSnapshot>, JsonRejection>,
) -> Result<(StatusCode, Json<Snapshot>), AppError> {
    let request = json_body(body)?;
    let snapshot = state.snapshots.save(request).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// Handle GET /api/snapshots/:id
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.snapshots.get(&id)?))
}

/// Handle DELETE /api/snapshots/:id
pub async fn delete_snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.snapshots.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
