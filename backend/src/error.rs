//! Error taxonomy for the constellation service.
//!
//! - validation: rejected before any I/O
//! - not-found: the requested portfolio does not exist
//! - dependency: repository or inference engine failures, wrapped with context
//! - internal: nothing usable could be produced (e.g. every embedding failed)
//!
//! Cache failures never surface here.

use crate::db::RepositoryError;
use crate::inference::InferenceError;

/// Result type for service operations.
pub type ConstellationResult<T> = Result<T, ConstellationError>;

#[derive(Debug, thiserror::Error)]
pub enum ConstellationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Repository failure during {operation}: {source}")]
    Repository {
        operation: String,
        #[source]
        source: RepositoryError,
    },

    #[error("Inference failure during {operation}: {source}")]
    Inference {
        operation: String,
        #[source]
        source: InferenceError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConstellationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Wrap a repository failure; not-found stays distinct from other lookup failures.
    pub fn repository(operation: impl Into<String>, source: RepositoryError) -> Self {
        if source.is_not_found() {
            return Self::NotFound(source.to_string());
        }
        Self::Repository {
            operation: operation.into(),
            source,
        }
    }

    pub fn inference(operation: impl Into<String>, source: InferenceError) -> Self {
        Self::Inference {
            operation: operation.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for failures of an external collaborator.
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Repository { .. } | Self::Inference { .. })
    }
}
