use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error type shared by the resource handlers. Auth endpoints keep their
/// own `AuthError`, this covers everything behind the login wall.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Access denied")]
    Forbidden,
    #[error("Check-in code expired")]
    CheckinExpired,
    #[error("Check-in code revoked")]
    CheckinRevoked,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Access denied"),
            ApiError::CheckinExpired => (StatusCode::BAD_REQUEST, "Check-in code expired"),
            ApiError::CheckinRevoked => (StatusCode::BAD_REQUEST, "Check-in code revoked"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
