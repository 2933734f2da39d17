//! Error handling module
//!
//! Centralized error types and HTTP response conversion. Every error reaches
//! the client through the response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

use crate::analytics::ANALYTICS_TYPES;
use crate::api::envelope;
use crate::auth::AuthError;
use crate::domain::Violation;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 401
    #[error("Unauthorized")]
    Unauthorized(#[from] AuthError),

    // 405
    #[error("Method not allowed")]
    MethodNotAllowed { allowed: &'static [&'static str] },

    // 400
    #[error("Invalid input")]
    InvalidInput(Vec<Violation>),

    #[error("Invalid JSON body")]
    InvalidBody(String),

    #[error("{0} ID required")]
    MissingIdentifier(&'static str),

    #[error("Invalid analytics type: {0}")]
    InvalidAnalyticsType(String),

    #[error("Account deletion requires confirmation")]
    ConfirmationRequired,

    // 404
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    // 500
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => AppError::NotFound { entity, id },
        }
    }
}

impl From<Vec<Violation>> for AppError {
    fn from(violations: Vec<Violation>) -> Self {
        AppError::InvalidInput(violations)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::Unauthorized(reason) => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized".to_string(),
                Some(json!({ "reason": reason.to_string() })),
            ),

            AppError::MethodNotAllowed { allowed } => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
                Some(json!({ "allowed": allowed })),
            ),

            // The first violation doubles as the headline message
            AppError::InvalidInput(violations) => {
                let message = violations
                    .first()
                    .map(|v| v.message.clone())
                    .unwrap_or_else(|| "Invalid input".to_string());
                (
                    StatusCode::BAD_REQUEST,
                    message,
                    Some(json!({ "violations": violations })),
                )
            }

            AppError::InvalidBody(detail) => (
                StatusCode::BAD_REQUEST,
                "Invalid JSON body".to_string(),
                Some(json!({ "error": detail })),
            ),

            AppError::MissingIdentifier(_) => (StatusCode::BAD_REQUEST, self.to_string(), None),

            AppError::InvalidAnalyticsType(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid analytics type".to_string(),
                Some(json!({ "allowed": ANALYTICS_TYPES })),
            ),

            AppError::ConfirmationRequired => (
                StatusCode::BAD_REQUEST,
                self.to_string(),
                Some(json!({ "hint": "Set 'confirm': true in request body" })),
            ),

            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string(), None),

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        envelope::error(&message, status, details)
    }
}
