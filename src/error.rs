use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Profile table errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// The key does not name any known vehicle model
    #[error("Unknown vehicle profile: {0}")]
    UnknownProfile(String),
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Unknown model key
    #[error(transparent)]
    Profile(#[from] ProfileError),
    /// Malformed request body or parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Advisory service disabled, or its reply could not be used
    #[error("Advisory unavailable: {0}")]
    AdvisoryUnavailable(String),
    /// Upstream API error
    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: StatusCode, message: String },
    /// HTTP request error (connect failure, timeout, body decode)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// No snapshot with the given id
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),
    /// Snapshot file could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Profile(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::AdvisoryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
            Self::HttpRequest(_) => StatusCode::BAD_GATEWAY,
            Self::SnapshotNotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::ConfigError(_) => "config_error",
        AppError::Profile(ProfileError::UnknownProfile(_)) => "unknown_profile",
        AppError::InvalidRequest(_) => "invalid_request",
        AppError::AdvisoryUnavailable(_) => "advisory_unavailable",
        AppError::UpstreamError { .. } => "upstream_error",
        AppError::HttpRequest(_) => "http_request_error",
        AppError::SnapshotNotFound(_) => "snapshot_not_found",
        AppError::StorageError(_) => "storage_error",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRequest(format!("JSON error: {}", err))
    }
}
