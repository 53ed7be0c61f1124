//! Unified error handling for fedhub core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with context and user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, RemoteError};
use crate::domain::DomainError;

/// Root error type for fedhub core operations.
#[derive(Debug, Error, Clone)]
pub enum FedError {
    /// Errors from the domain layer (invariant and normalization failures).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (remote and orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl FedError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// The remote error underneath, if this failure came from the table client.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Application(ApplicationError::Remote { source, .. }) => Some(source),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.remote().is_some_and(RemoteError::is_retryable)
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Remote,
}

/// Convenient result type alias.
pub type FedResult<T> = Result<T, FedError>;
