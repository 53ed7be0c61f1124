// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cached snapshots carry the last error)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Normalization Errors
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    // ========================================================================
    // Invariant Violations
    // ========================================================================
    #[error("A game cannot oppose team '{team_id}' to itself")]
    SameTeams { team_id: String },

    // ========================================================================
    // Vocabulary Errors
    // ========================================================================
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Unknown {vocabulary} status: {value}")]
    InvalidStatus {
        vocabulary: &'static str,
        value: String,
    },

    #[error("Unknown view: {0}")]
    UnknownView(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("The record has no '{}' value", field),
                "Records without an identity are excluded from the collection".into(),
            ],
            Self::InvalidField { field, reason } => vec![
                format!("Check the value given for '{}'", field),
                format!("Details: {}", reason),
            ],
            Self::SameTeams { .. } => vec![
                "Home and away teams must be different".into(),
                "Pick another team for one side of the game".into(),
            ],
            Self::UnknownCollection(name) => vec![
                format!("'{}' is not a known collection", name),
                "Known collections: teams, clubs, players, games, competitions, news, \
                 events, referees, federations, regional-associations, coaches"
                    .into(),
            ],
            Self::InvalidStatus { vocabulary, .. } => vec![
                format!("Use one of the documented {} statuses", vocabulary),
            ],
            Self::UnknownView(_) => {
                vec!["Known views: home, games, teams, news, organizations, admin".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. }
            | Self::InvalidField { .. }
            | Self::SameTeams { .. }
            | Self::InvalidStatus { .. } => ErrorCategory::Validation,
            Self::UnknownCollection(_) | Self::UnknownView(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
