//! In-memory table client for tests and demos.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use async_trait::async_trait;
use tracing::debug;

use fedhub_core::{
    application::{
        RemoteError,
        ports::{Query, TableClient},
    },
    domain::{Collection, EntityId, RawRecord},
};

use super::{apply_patch, insert_row, missing_row, row_has_id, select};

/// Thread-safe in-memory tables with failure injection.
///
/// Cloning shares the same tables, so a test can keep a handle to flip the
/// client offline after giving it to a facade.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableClient {
    inner: Arc<RwLock<MemoryTables>>,
}

#[derive(Debug, Default)]
struct MemoryTables {
    tables: HashMap<Collection, Vec<RawRecord>>,
    offline: bool,
    scripted_failures: VecDeque<RemoteError>,
    latency: Duration,
    fetch_counts: HashMap<Collection, usize>,
}

impl MemoryTableClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding.
    pub fn with_rows(self, collection: Collection, rows: Vec<RawRecord>) -> Self {
        self.seed(collection, rows);
        self
    }

    /// Every call waits this long before answering.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.tables_mut().latency = latency;
        self
    }

    /// Replace a table's rows.
    pub fn seed(&self, collection: Collection, rows: Vec<RawRecord>) {
        self.tables_mut().tables.insert(collection, rows);
    }

    /// Current rows of a table, unfiltered (testing helper).
    pub fn rows(&self, collection: Collection) -> Vec<RawRecord> {
        self.tables()
            .tables
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Fail every call with a connectivity error until [`go_online`](Self::go_online).
    pub fn go_offline(&self) {
        self.tables_mut().offline = true;
    }

    pub fn go_online(&self) {
        self.tables_mut().offline = false;
    }

    /// Fail the next call (of any kind) with this error.
    pub fn fail_next(&self, error: RemoteError) {
        self.tables_mut().scripted_failures.push_back(error);
    }

    /// Number of `fetch_all` calls that reached this client for a collection.
    pub fn fetch_count(&self, collection: Collection) -> usize {
        self.tables()
            .fetch_counts
            .get(&collection)
            .copied()
            .unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Bookkeeping shared by every call: counting, failure injection, latency.
    async fn begin_call(&self, collection: Collection, fetch: bool) -> Result<(), RemoteError> {
        let latency = {
            let mut inner = self.tables_mut();
            if fetch {
                *inner.fetch_counts.entry(collection).or_insert(0) += 1;
            }
            if let Some(error) = inner.scripted_failures.pop_front() {
                debug!(collection = %collection, error = %error, "injected failure");
                return Err(error);
            }
            if inner.offline {
                return Err(RemoteError::connectivity("table service is unreachable"));
            }
            inner.latency
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(())
    }

    fn tables(&self) -> std::sync::RwLockReadGuard<'_, MemoryTables> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn tables_mut(&self) -> std::sync::RwLockWriteGuard<'_, MemoryTables> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TableClient for MemoryTableClient {
    async fn fetch_all(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<RawRecord>, RemoteError> {
        self.begin_call(collection, true).await?;

        let inner = self.tables();
        let rows = inner
            .tables
            .get(&collection)
            .map(|rows| select(rows, query))
            .unwrap_or_default();
        Ok(rows)
    }

    async fn insert(
        &self,
        collection: Collection,
        record: RawRecord,
    ) -> Result<RawRecord, RemoteError> {
        self.begin_call(collection, false).await?;

        let mut inner = self.tables_mut();
        insert_row(inner.tables.entry(collection).or_default(), record)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &EntityId,
        patch: RawRecord,
    ) -> Result<RawRecord, RemoteError> {
        self.begin_call(collection, false).await?;

        let mut inner = self.tables_mut();
        let row = inner
            .tables
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|row| row_has_id(row, id)))
            .ok_or_else(|| missing_row(id))?;
        apply_patch(row, patch);
        Ok(row.clone())
    }

    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), RemoteError> {
        self.begin_call(collection, false).await?;

        let mut inner = self.tables_mut();
        let rows = inner.tables.entry(collection).or_default();
        let before = rows.len();
        rows.retain(|row| !row_has_id(row, id));
        if rows.len() == before {
            return Err(missing_row(id));
        }
        Ok(())
    }
}
