//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ConstellationError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// A repository or inference call failed
    Dependency { message: String, operation: String },
    /// Internal server error
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Dependency { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::NotFound(msg) => ApiError::new("NOT_FOUND", msg),
            AppError::BadRequest(msg) => ApiError::new("BAD_REQUEST", msg),
            AppError::Dependency { message, operation } => {
                ApiError::new("DEPENDENCY_ERROR", message)
                    .with_details(format!("operation={}", operation))
            }
            AppError::Internal(msg) => ApiError::new("INTERNAL_ERROR", msg),
        };

        (status, Json(error)).into_response()
    }
}

impl From<ConstellationError> for AppError {
    fn from(err: ConstellationError) -> Self {
        let message = err.to_string();
        match err {
            ConstellationError::Validation(_) => AppError::BadRequest(message),
            ConstellationError::NotFound(_) => AppError::NotFound(message),
            ConstellationError::Repository { operation, .. }
            | ConstellationError::Inference { operation, .. } => {
                AppError::Dependency { message, operation }
            }
            ConstellationError::Internal(_) => AppError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RepositoryError;
    use crate::inference::InferenceError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ConstellationError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                ConstellationError::repository("get_patents_by_portfolio", RepositoryError::not_found("gone")),
                StatusCode::NOT_FOUND,
            ),
            (
                ConstellationError::repository("get_patents_by_portfolio", RepositoryError::connection("down")),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ConstellationError::inference("reduce", InferenceError::Reduction("boom".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (ConstellationError::internal("empty"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_dependency_details_name_operation() {
        let err = AppError::from(ConstellationError::inference(
            "reduce",
            InferenceError::Reduction("boom".into()),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
