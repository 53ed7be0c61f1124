//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the remote
//! boundary, not business rules. Business rule errors are `DomainError`
//! from `crate::domain`.

use thiserror::Error;

use crate::domain::{Collection, EntityId};
use crate::error::ErrorCategory;

/// Failure class reported by a remote table client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// Network unreachable, timed out, service down.
    Connectivity,
    /// Credentials missing or rejected, row-level policy refused.
    Unauthorized,
    /// Payload or response does not match the table's shape.
    SchemaMismatch,
    /// The addressed row does not exist.
    NotFound,
    Other,
}

impl RemoteErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Unauthorized => "unauthorized",
            Self::SchemaMismatch => "schema mismatch",
            Self::NotFound => "not found",
            Self::Other => "remote failure",
        }
    }
}

/// Error surfaced by the remote table client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}: {message}", .kind.as_str())]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Connectivity, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Unauthorized, message)
    }

    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::SchemaMismatch, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::NotFound, message)
    }

    pub fn is_retryable(&self) -> bool {
        self.kind == RemoteErrorKind::Connectivity
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The remote table client refused or failed the call.
    #[error("{collection}: {source}")]
    Remote {
        collection: Collection,
        #[source]
        source: RemoteError,
    },

    /// The remote answered a write with something that does not normalize.
    #[error("Remote returned an unusable {collection} record: {reason}")]
    InvalidPayload {
        collection: Collection,
        reason: String,
    },

    /// An entity was addressed that is neither cached nor on the remote.
    #[error("{collection} record '{id}' not found")]
    NotFound { collection: Collection, id: EntityId },
}

impl ApplicationError {
    pub fn remote(collection: Collection, source: RemoteError) -> Self {
        Self::Remote { collection, source }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Remote { source, .. } => match source.kind {
                RemoteErrorKind::Connectivity => vec![
                    "The data service could not be reached".into(),
                    "Check the connection and try again".into(),
                ],
                RemoteErrorKind::Unauthorized => vec![
                    "The data service rejected the request".into(),
                    "Sign in again or check the account's permissions".into(),
                ],
                RemoteErrorKind::SchemaMismatch => vec![
                    "The data service did not accept the record's shape".into(),
                    "Check field names and value types".into(),
                ],
                RemoteErrorKind::NotFound => vec![
                    "The record no longer exists".into(),
                    "Refresh the list to see the current records".into(),
                ],
                RemoteErrorKind::Other => vec!["Check the error details above".into()],
            },
            Self::NotFound { collection, .. } => vec![
                format!("No such {} record", collection.label().to_lowercase()),
                format!("List the records with: fedhub list {}", collection),
            ],
            Self::InvalidPayload { .. } => {
                vec!["The remote row is missing its identity; check the table".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Remote { source, .. } if source.kind == RemoteErrorKind::NotFound => {
                ErrorCategory::NotFound
            }
            Self::Remote { .. } => ErrorCategory::Remote,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidPayload { .. } => ErrorCategory::Remote,
        }
    }
}
