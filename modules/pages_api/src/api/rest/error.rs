use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::domain::error::DomainError;

/// REST error carrying a status code and a human-readable detail message,
/// rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn unauthenticated(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, detail)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Map domain errors to HTTP responses. Forbidden stays distinct from
/// not-found so clients can tell "not yours" from "doesn't exist".
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::EmailAlreadyRegistered { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "Email already registered")
            }
            DomainError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            DomainError::InvalidToken => Self::new(StatusCode::UNAUTHORIZED, "Invalid token"),
            DomainError::UserNotFound { .. } => {
                Self::new(StatusCode::UNAUTHORIZED, "User not found")
            }
            DomainError::PageNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "Page not found")
            }
            DomainError::NotOwner { .. } => Self::new(StatusCode::FORBIDDEN, "Not allowed"),
            DomainError::Database { .. } | DomainError::Internal { .. } => {
                // Log the internal error details but don't expose them to the client
                tracing::error!(error = ?e, "Internal error");
                Self::internal()
            }
        }
    }
}
