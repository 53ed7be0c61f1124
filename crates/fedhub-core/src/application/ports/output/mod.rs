//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fedhub-adapters` crate provides implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::application::RemoteError;
use crate::domain::{Collection, EntityId, RawRecord};

#[cfg(test)]
use mockall::automock;

/// Ordering for a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

/// Selection applied by the remote: equality filters plus optional ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<OrderBy>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default selection for a collection (ordering from the catalog).
    pub fn for_collection(collection: Collection) -> Self {
        let order_by = crate::domain::catalog::find_collection(collection)
            .and_then(|def| def.order_by)
            .map(|(column, ascending)| OrderBy {
                column: column.to_string(),
                ascending,
            });
        Self {
            filters: Vec::new(),
            order_by,
        }
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order_by = Some(OrderBy {
            column: column.into(),
            ascending,
        });
        self
    }

    /// Whether a raw row passes every equality filter.
    pub fn matches(&self, record: &RawRecord) -> bool {
        self.filters
            .iter()
            .all(|(column, expected)| record.get(column) == Some(expected))
    }
}

/// Port for the hosted structured-data service.
///
/// Implemented by:
/// - `fedhub_adapters::table_client::MemoryTableClient` (tests, demos)
/// - `fedhub_adapters::table_client::JsonDirTableClient` (one JSON file per table)
///
/// ## Design Notes
///
/// - Rows are schema-less; normalization happens in the application layer
/// - Every failure is a typed [`RemoteError`], never a panic
/// - Timeouts belong to the adapter's transport
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Read every row of a collection matching the query.
    async fn fetch_all(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<RawRecord>, RemoteError>;

    /// Insert a row; returns the stored row including its assigned `id`.
    async fn insert(
        &self,
        collection: Collection,
        record: RawRecord,
    ) -> Result<RawRecord, RemoteError>;

    /// Merge `patch` into the row with this id; returns the stored row.
    async fn update(
        &self,
        collection: Collection,
        id: &EntityId,
        patch: RawRecord,
    ) -> Result<RawRecord, RemoteError>;

    /// Remove the row with this id. Missing rows are `NotFound`.
    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), RemoteError>;
}

/// Port for static placeholder rows.
///
/// Implemented by:
/// - `fedhub_adapters::BuiltinFallback` (datasets shipped with the crate)
#[cfg_attr(test, automock)]
pub trait FallbackProvider: Send + Sync {
    /// Raw rows for a collection; normalized like fetched rows.
    fn records(&self, collection: Collection) -> Vec<RawRecord>;
}

/// Provider with no placeholder data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl FallbackProvider for NoFallback {
    fn records(&self, _collection: Collection) -> Vec<RawRecord> {
        Vec::new()
    }
}

/// Severity of a reported outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Destructive,
}

/// A completed mutation, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Outcome {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Port for the notification collaborator.
///
/// Fire-and-forget: implementations must not block and cannot fail the
/// mutation that triggered them.
///
/// Implemented by:
/// - `fedhub_adapters::notifier::TracingNotifier` (log lines)
/// - `fedhub_adapters::notifier::RecordingNotifier` (tests)
/// - the CLI's console notifier
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    fn report(&self, outcome: Outcome);
}

/// Notifier that drops every outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn report(&self, _outcome: Outcome) {}
}
