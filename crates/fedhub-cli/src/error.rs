//! Errors surfaced by the `fedhub` binary.
//!
//! Every failure ends up as one [`CliError`]. It knows which [`Failure`]
//! class it belongs to (and so which exit code to use), what to suggest to
//! the user, and how to render itself on stderr.

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use fedhub_core::error::{ErrorCategory, FedError};

pub type CliResult<T> = Result<T, CliError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Record fields on the command line could not be turned into a record.
    #[error("Invalid record input: {message}")]
    Input {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The configuration could not be loaded, or a key is unknown.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The data layer refused or failed the operation.
    #[error("{0}")]
    Data(#[from] FedError),

    /// A file named on the command line could not be read.
    #[error("Cannot read {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the terminal or starting the runtime failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure classes, one per exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Bad arguments or a record that breaks a domain rule.
    Usage,
    /// The record does not exist.
    Missing,
    /// The data source could not be reached or refused the request.
    Remote,
    Config,
    Internal,
}

impl Failure {
    /// | Failure  | Code |
    /// |----------|------|
    /// | Usage    |  2   |
    /// | Missing  |  3   |
    /// | Config   |  4   |
    /// | Remote   |  1   |
    /// | Internal |  1   |
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Usage => 2,
            Self::Missing => 3,
            Self::Config => 4,
            Self::Remote | Self::Internal => 1,
        }
    }
}

impl CliError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            source: None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn failure(&self) -> Failure {
        match self {
            Self::Input { .. } => Failure::Usage,
            Self::Config { .. } => Failure::Config,
            Self::Data(err) => match err.category() {
                ErrorCategory::Validation => Failure::Usage,
                ErrorCategory::NotFound => Failure::Missing,
                ErrorCategory::Remote => Failure::Remote,
            },
            Self::File { .. } => Failure::Usage,
            Self::Io(_) => Failure::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.failure().exit_code()
    }

    /// What the user can do about it.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Input { .. } => vec![
                "Give fields as --set FIELD=VALUE (repeatable)".into(),
                "Or pass a whole JSON object with --json '{...}' or --json @file.json".into(),
            ],
            Self::Config { .. } => vec![
                "Show the active values with: fedhub config list".into(),
                "Show where the config file is read from with: fedhub config path".into(),
            ],
            Self::Data(err) => {
                let mut suggestions = err.suggestions();
                if err.is_retryable() {
                    suggestions.push("Check --data-dir or FEDHUB_DATA_DIR".into());
                }
                suggestions
            }
            Self::File { path, .. } => vec![format!("Check that {} exists", path.display())],
            Self::Io(_) => Vec::new(),
        }
    }

    /// Render for stderr. Colors only when `colored`; the cause chain only
    /// when `verbose`.
    pub fn render(&self, verbose: bool, colored: bool) -> String {
        let mut out = if colored {
            format!("\n{} {}\n", "\u{2717} Error:".red().bold(), self.to_string().red())
        } else {
            format!("\nError: {self}\n")
        };

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let line = format!("  caused by: {err}");
                if colored {
                    out.push_str(&format!("{}\n", line.dimmed()));
                } else {
                    out.push_str(&format!("{line}\n"));
                }
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            if colored {
                out.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            } else {
                out.push_str("\nSuggestions:\n");
            }
            for suggestion in suggestions {
                out.push_str(&format!("  - {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str("\nRun again with -v for the full cause.\n");
        }
        out
    }

    pub fn log(&self) {
        match self.failure() {
            Failure::Usage | Failure::Missing => tracing::warn!(error = %self, "command rejected"),
            Failure::Remote | Failure::Config | Failure::Internal => {
                tracing::error!(error = %self, "command failed")
            }
        }
        if let Some(cause) = self.source() {
            tracing::debug!(%cause, "error cause");
        }
    }
}

/// Attach a path to a failed file read.
pub trait ReadContext<T> {
    fn for_path(self, path: impl Into<PathBuf>) -> CliResult<T>;
}

impl<T> ReadContext<T> for std::io::Result<T> {
    fn for_path(self, path: impl Into<PathBuf>) -> CliResult<T> {
        self.map_err(|source| CliError::File {
            path: path.into(),
            source,
        })
    }
}
