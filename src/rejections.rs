use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level error responder. Every failure path in a handler maps
/// to one of these so the client always gets a JSON body with a specific
/// message.
#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    Unauthorized,
    Forbidden,
    NotFound(&'static str),
    Input(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "authentication required"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "action not allowed"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Input(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (code, Json(json!({ "error": message }))).into_response()
    }
}

/// Maps db/service errors onto `AppError` while logging the underlying cause.
pub trait ResultExt<T> {
    fn reject(self, msg: &'static str) -> Result<T, AppError>;
    fn reject_input(self, msg: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{msg}: {e}");
            AppError::Internal(msg)
        })
    }

    fn reject_input(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{msg}: {e}");
            AppError::Input(msg)
        })
    }
}
