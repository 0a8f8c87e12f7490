pub mod advisory;
pub mod calculate;
pub mod health;
pub mod metrics_handler;
pub mod profiles;
pub mod snapshots;

use arc_swap::ArcSwap;
use axum::{extract::rejection::JsonRejection, Json};
use std::sync::Arc;

use crate::{advisory::AdvisorClient, config::Config, error::AppError, snapshots::SnapshotStore};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
    pub advisor: AdvisorClient,
    pub snapshots: Arc<SnapshotStore>,
}

/// Turn a body rejection into the service's JSON error shape
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}
