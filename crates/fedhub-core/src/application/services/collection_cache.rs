//! Collection Cache - one cached, normalized collection.
//!
//! State machine (see [`CacheStatus`]):
//!
//! ```text
//!   Empty ──fetch──▶ Loading ──ok──▶ Ready(remote)
//!                       │
//!                       └──err──▶ Ready(fallback)   (no prior success)
//!
//!   Ready ──refresh/invalidate──▶ Loading ──ok──▶ Ready(remote, new data)
//!                                    └──err──▶ Ready(previous data kept)
//! ```
//!
//! Fetches for one collection are serialized: a caller that arrives while a
//! fetch is in flight waits for it and shares its result instead of issuing
//! a second network call. State lives behind a short-lived lock that is
//! never held across an `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::sync::{Mutex, broadcast};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::application::RemoteError;
use crate::application::ports::{FallbackProvider, Query, TableClient};
use crate::domain::{Collection, Entity, EntityId, normalize_all};

const EVENT_CAPACITY: usize = 64;

/// Lifecycle of a cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Nothing fetched yet (or first fetch failed with no fallback rows).
    Empty,
    /// A fetch is in flight.
    Loading,
    /// Data present, from the remote or from fallback rows.
    Ready,
}

impl CacheStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loading => "loading",
            Self::Ready => "ready",
        }
    }
}

/// Whether cached data may be served as-is.
///
/// Derived from [`CacheStatus`] and the staleness window; exactly one
/// applies at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    /// Past the window (or never fetched); eligible for background refresh.
    Stale,
    Loading,
}

impl Freshness {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Stale => "stale",
            Self::Loading => "loading",
        }
    }
}

/// Where the cached entities came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    None,
    Remote,
    Fallback,
}

impl DataSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Remote => "remote",
            Self::Fallback => "fallback",
        }
    }
}

/// A state transition, published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEvent {
    pub collection: Collection,
    pub kind: CacheEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEventKind {
    /// A successful write marked the collection out of date.
    Invalidated,
    /// A fetch started.
    Loading,
    /// A fetch completed; `rejected` records failed normalization.
    Loaded { count: usize, rejected: usize },
    /// First fetch failed; fallback rows were installed.
    FallbackApplied { count: usize },
    /// A refresh failed after a prior success; `kept` entities stay cached.
    RefreshFailed { message: String, kept: usize },
}

/// The read triple handed to consumers, plus provenance.
#[derive(Debug, Clone)]
pub struct CollectionSnapshot<T> {
    pub data: Arc<[T]>,
    pub is_loading: bool,
    /// Message of the last failed fetch, cleared by the next success.
    pub error: Option<String>,
    pub status: CacheStatus,
    pub source: DataSource,
    pub freshness: Freshness,
}

impl<T> CollectionSnapshot<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

struct CacheState<T> {
    status: CacheStatus,
    data: Arc<[T]>,
    source: DataSource,
    fetched_at: Option<Instant>,
    last_error: Option<String>,
    loaded_from_remote: bool,
    completed_fetches: u64,
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        Self {
            status: CacheStatus::Empty,
            data: Arc::from(Vec::new()),
            source: DataSource::None,
            fetched_at: None,
            last_error: None,
            loaded_from_remote: false,
            completed_fetches: 0,
        }
    }
}

struct Inner<T> {
    client: Arc<dyn TableClient>,
    fallback: Arc<dyn FallbackProvider>,
    query: Query,
    window: Duration,
    state: RwLock<CacheState<T>>,
    fetch_gate: Mutex<()>,
    background_refresh: AtomicBool,
    events: broadcast::Sender<CacheEvent>,
}

/// Cached, normalized view of one remote collection.
///
/// Cloning is cheap and yields a handle to the same cache.
pub struct CollectionCache<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for CollectionCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity> CollectionCache<T> {
    /// Create a cache that fetches with the collection's default query.
    pub fn new(
        client: Arc<dyn TableClient>,
        fallback: Arc<dyn FallbackProvider>,
        window: Duration,
    ) -> Self {
        Self::with_query(client, fallback, window, Query::for_collection(T::COLLECTION))
    }

    pub fn with_query(
        client: Arc<dyn TableClient>,
        fallback: Arc<dyn FallbackProvider>,
        window: Duration,
        query: Query,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                client,
                fallback,
                query,
                window,
                state: RwLock::new(CacheState::default()),
                fetch_gate: Mutex::new(()),
                background_refresh: AtomicBool::new(false),
                events,
            }),
        }
    }

    pub fn collection(&self) -> Collection {
        T::COLLECTION
    }

    pub fn window(&self) -> Duration {
        self.inner.window
    }

    /// Receive every subsequent state transition.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.inner.events.subscribe()
    }

    pub fn status(&self) -> CacheStatus {
        self.read_state().status
    }

    pub fn freshness(&self) -> Freshness {
        let state = self.read_state();
        freshness_of(&state, self.inner.window, Instant::now())
    }

    pub fn is_loading(&self) -> bool {
        self.status() == CacheStatus::Loading
    }

    /// Current state, without side effects.
    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        let state = self.read_state();
        CollectionSnapshot {
            data: Arc::clone(&state.data),
            is_loading: state.status == CacheStatus::Loading,
            error: state.last_error.clone(),
            status: state.status,
            source: state.source,
            freshness: freshness_of(&state, self.inner.window, Instant::now()),
        }
    }

    /// Current state; a stale collection is refreshed in the background.
    ///
    /// Never waits for the network. Outside a tokio runtime the stale data
    /// is served without a refresh.
    pub fn read(&self) -> CollectionSnapshot<T> {
        let snapshot = self.snapshot();
        if snapshot.freshness == Freshness::Stale {
            self.spawn_refresh();
        }
        snapshot
    }

    /// Look up one cached entity.
    pub fn get(&self, id: &EntityId) -> Option<T> {
        self.read_state()
            .data
            .iter()
            .find(|entity| entity.id() == id)
            .cloned()
    }

    /// Wait for the first fetch if nothing was ever fetched; otherwise `read`.
    pub async fn ensure_loaded(&self) -> CollectionSnapshot<T> {
        let never_fetched = self.read_state().completed_fetches == 0;
        if never_fetched {
            self.refresh().await
        } else {
            self.read()
        }
    }

    /// Fetch now, or join a fetch already in flight.
    #[instrument(skip(self), fields(collection = %T::COLLECTION))]
    pub async fn refresh(&self) -> CollectionSnapshot<T> {
        let observed = self.read_state().completed_fetches;
        let _gate = self.inner.fetch_gate.lock().await;

        let completed = self.read_state().completed_fetches;
        if completed != observed {
            debug!("joined fetch that was in flight");
            return self.snapshot();
        }

        self.fetch_locked().await;
        self.snapshot()
    }

    /// Mark the collection out of date and fetch it again.
    ///
    /// Unlike [`refresh`](Self::refresh) this never joins an earlier fetch:
    /// the data must reflect writes that completed before this call.
    #[instrument(skip(self), fields(collection = %T::COLLECTION))]
    pub async fn invalidate(&self) -> CollectionSnapshot<T> {
        self.write_state().status = CacheStatus::Loading;
        self.emit(CacheEventKind::Invalidated);

        let _gate = self.inner.fetch_gate.lock().await;
        self.fetch_locked().await;
        self.snapshot()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Must be called with `fetch_gate` held.
    async fn fetch_locked(&self) {
        self.write_state().status = CacheStatus::Loading;
        self.emit(CacheEventKind::Loading);

        let result = self
            .inner
            .client
            .fetch_all(T::COLLECTION, &self.inner.query)
            .await;

        match result {
            Ok(records) => self.apply_fetched(&records),
            Err(e) => self.apply_failure(&e),
        }
    }

    fn apply_fetched(&self, records: &[crate::domain::RawRecord]) {
        let normalized = normalize_all::<T>(records);
        let count = normalized.entities.len();
        {
            let mut state = self.write_state();
            state.data = Arc::from(normalized.entities);
            state.status = CacheStatus::Ready;
            state.source = DataSource::Remote;
            state.fetched_at = Some(Instant::now());
            state.last_error = None;
            state.loaded_from_remote = true;
            state.completed_fetches += 1;
        }

        info!(
            collection = %T::COLLECTION,
            count,
            rejected = normalized.rejected,
            "collection loaded"
        );
        self.emit(CacheEventKind::Loaded {
            count,
            rejected: normalized.rejected,
        });
    }

    fn apply_failure(&self, error: &RemoteError) {
        warn!(collection = %T::COLLECTION, error = %error, "fetch failed");

        let mut state = self.write_state();
        state.completed_fetches += 1;
        state.last_error = Some(error.message.clone());

        if state.loaded_from_remote {
            state.status = CacheStatus::Ready;
            let kept = state.data.len();
            drop(state);
            self.emit(CacheEventKind::RefreshFailed {
                message: error.message.clone(),
                kept,
            });
            return;
        }

        let fallback = normalize_all::<T>(&self.inner.fallback.records(T::COLLECTION));
        let count = fallback.entities.len();
        state.data = Arc::from(fallback.entities);
        state.fetched_at = None;
        if count == 0 {
            state.status = CacheStatus::Empty;
            state.source = DataSource::None;
        } else {
            state.status = CacheStatus::Ready;
            state.source = DataSource::Fallback;
        }
        drop(state);

        info!(collection = %T::COLLECTION, count, "serving fallback data");
        self.emit(CacheEventKind::FallbackApplied { count });
    }

    fn spawn_refresh(&self) {
        if self.inner.background_refresh.swap(true, Ordering::AcqRel) {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!(collection = %T::COLLECTION, "stale read, refreshing in background");
                let cache = self.clone();
                handle.spawn(async move {
                    cache.refresh().await;
                    cache.inner.background_refresh.store(false, Ordering::Release);
                });
            }
            Err(_) => {
                self.inner.background_refresh.store(false, Ordering::Release);
                debug!(collection = %T::COLLECTION, "no runtime, serving stale data");
            }
        }
    }

    fn emit(&self, kind: CacheEventKind) {
        // No subscribers is fine.
        let _ = self.inner.events.send(CacheEvent {
            collection: T::COLLECTION,
            kind,
        });
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CacheState<T>> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CacheState<T>> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn freshness_of<T>(state: &CacheState<T>, window: Duration, now: Instant) -> Freshness {
    match state.status {
        CacheStatus::Loading => Freshness::Loading,
        CacheStatus::Empty => Freshness::Stale,
        CacheStatus::Ready => match state.fetched_at {
            Some(at) if now.saturating_duration_since(at) < window => Freshness::Fresh,
            _ => Freshness::Stale,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::application::ports::{MockFallbackProvider, MockTableClient, NoFallback};
    use crate::domain::{EntityId, RawRecord, Team};

    const WINDOW: Duration = Duration::from_secs(300);

    fn raw(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    fn remote_teams() -> Vec<RawRecord> {
        vec![
            raw(json!({ "id": "t1", "name": "Remote One" })),
            raw(json!({ "id": "t2", "name": "Remote Two" })),
        ]
    }

    fn fallback_teams() -> MockFallbackProvider {
        let mut fallback = MockFallbackProvider::new();
        fallback.expect_records().returning(|_| {
            vec![
                raw(json!({ "id": "f1", "name": "CD Travadores" })),
                raw(json!({ "id": "f2", "name": "ABC Académica" })),
                raw(json!({ "id": "f3", "name": "Sporting Clube da Praia" })),
            ]
        });
        fallback
    }

    fn cache_with(client: MockTableClient, fallback: MockFallbackProvider) -> CollectionCache<Team> {
        CollectionCache::new(Arc::new(client), Arc::new(fallback), WINDOW)
    }

    fn drain(rx: &mut broadcast::Receiver<CacheEvent>) -> Vec<CacheEventKind> {
        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.kind);
        }
        kinds
    }

    #[tokio::test]
    async fn starts_empty_and_stale() {
        let cache = cache_with(MockTableClient::new(), MockFallbackProvider::new());
        let snapshot = cache.snapshot();
        assert_eq!(snapshot.status, CacheStatus::Empty);
        assert_eq!(snapshot.freshness, Freshness::Stale);
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn first_fetch_makes_collection_ready() {
        let mut client = MockTableClient::new();
        client
            .expect_fetch_all()
            .times(1)
            .returning(|_, _| Ok(remote_teams()));
        let cache = cache_with(client, MockFallbackProvider::new());
        let mut rx = cache.subscribe();

        let snapshot = cache.refresh().await;

        assert_eq!(snapshot.status, CacheStatus::Ready);
        assert_eq!(snapshot.source, DataSource::Remote);
        assert_eq!(snapshot.freshness, Freshness::Fresh);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            drain(&mut rx),
            vec![
                CacheEventKind::Loading,
                CacheEventKind::Loaded {
                    count: 2,
                    rejected: 0
                }
            ]
        );
    }

    #[tokio::test]
    async fn first_failure_installs_fallback() {
        let mut client = MockTableClient::new();
        client
            .expect_fetch_all()
            .returning(|_, _| Err(RemoteError::connectivity("network down")));
        let cache = cache_with(client, fallback_teams());

        let snapshot = cache.refresh().await;

        assert_eq!(snapshot.status, CacheStatus::Ready);
        assert_eq!(snapshot.source, DataSource::Fallback);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.error.as_deref(), Some("network down"));
        assert_eq!(snapshot.freshness, Freshness::Stale);
    }

    #[tokio::test]
    async fn first_failure_without_fallback_stays_empty() {
        let mut client = MockTableClient::new();
        client
            .expect_fetch_all()
            .returning(|_, _| Err(RemoteError::unauthorized("jwt expired")));
        let cache: CollectionCache<Team> =
            CollectionCache::new(Arc::new(client), Arc::new(NoFallback), WINDOW);

        let snapshot = cache.refresh().await;

        assert_eq!(snapshot.status, CacheStatus::Empty);
        assert_eq!(snapshot.source, DataSource::None);
    }

    #[tokio::test]
    async fn failed_refresh_does_not_clobber_remote_data() {
        let mut client = MockTableClient::new();
        let mut seq = mockall::Sequence::new();
        client
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(remote_teams()));
        client
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(RemoteError::connectivity("timeout")));
        let cache = cache_with(client, fallback_teams());

        let before = cache.refresh().await;
        let after = cache.refresh().await;

        assert_eq!(after.status, CacheStatus::Ready);
        assert_eq!(after.source, DataSource::Remote);
        assert_eq!(after.data, before.data);
        assert_eq!(after.error.as_deref(), Some("timeout"));
    }

    #[tokio::test]
    async fn later_success_supersedes_fallback() {
        let mut client = MockTableClient::new();
        let mut seq = mockall::Sequence::new();
        client
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(RemoteError::connectivity("offline")));
        client
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(remote_teams()));
        let cache = cache_with(client, fallback_teams());

        assert_eq!(cache.refresh().await.source, DataSource::Fallback);
        let snapshot = cache.refresh().await;

        assert_eq!(snapshot.source, DataSource::Remote);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn unusable_records_are_dropped() {
        let mut client = MockTableClient::new();
        client.expect_fetch_all().returning(|_, _| {
            Ok(vec![
                raw(json!({ "id": "t1", "name": "Kept" })),
                raw(json!({ "name": "No identity" })),
            ])
        });
        let cache = cache_with(client, MockFallbackProvider::new());
        let mut rx = cache.subscribe();

        let snapshot = cache.refresh().await;

        assert_eq!(snapshot.len(), 1);
        assert!(drain(&mut rx).contains(&CacheEventKind::Loaded {
            count: 1,
            rejected: 1
        }));
    }

    #[tokio::test]
    async fn invalidate_always_refetches() {
        let mut client = MockTableClient::new();
        client
            .expect_fetch_all()
            .times(2)
            .returning(|_, _| Ok(remote_teams()));
        let cache = cache_with(client, MockFallbackProvider::new());
        cache.refresh().await;
        let mut rx = cache.subscribe();

        let snapshot = cache.invalidate().await;

        assert_eq!(snapshot.status, CacheStatus::Ready);
        assert_eq!(
            drain(&mut rx),
            vec![
                CacheEventKind::Invalidated,
                CacheEventKind::Loading,
                CacheEventKind::Loaded {
                    count: 2,
                    rejected: 0
                }
            ]
        );
    }

    #[tokio::test]
    async fn get_finds_cached_entity() {
        let mut client = MockTableClient::new();
        client
            .expect_fetch_all()
            .returning(|_, _| Ok(remote_teams()));
        let cache = cache_with(client, MockFallbackProvider::new());
        cache.refresh().await;

        assert_eq!(
            cache.get(&EntityId::new("t2")).map(|t| t.name),
            Some("Remote Two".to_string())
        );
        assert!(cache.get(&EntityId::new("missing")).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn data_goes_stale_after_the_window() {
        let mut client = MockTableClient::new();
        client
            .expect_fetch_all()
            .returning(|_, _| Ok(remote_teams()));
        let cache = cache_with(client, MockFallbackProvider::new());
        cache.refresh().await;

        tokio::time::advance(WINDOW - Duration::from_secs(1)).await;
        assert_eq!(cache.freshness(), Freshness::Fresh);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.freshness(), Freshness::Stale);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_read_returns_immediately_and_refreshes_in_background() {
        let mut client = MockTableClient::new();
        let mut seq = mockall::Sequence::new();
        client
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![raw(json!({ "id": "t1", "name": "Old" }))]));
        client
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![raw(json!({ "id": "t1", "name": "New" }))]));
        let cache = cache_with(client, MockFallbackProvider::new());
        cache.refresh().await;
        tokio::time::advance(WINDOW + Duration::from_secs(1)).await;
        let mut rx = cache.subscribe();

        let stale = cache.read();
        assert_eq!(stale.freshness, Freshness::Stale);
        assert_eq!(stale.data[0].name, "Old");

        loop {
            let event = rx.recv().await.unwrap();
            if matches!(event.kind, CacheEventKind::Loaded { .. }) {
                break;
            }
        }
        let fresh = cache.read();
        assert_eq!(fresh.freshness, Freshness::Fresh);
        assert_eq!(fresh.data[0].name, "New");
    }

    /// Client whose fetch suspends, so concurrent callers overlap.
    struct SlowClient {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl TableClient for SlowClient {
        async fn fetch_all(
            &self,
            _collection: Collection,
            _query: &Query,
        ) -> Result<Vec<RawRecord>, RemoteError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(250)).await;
            Ok(remote_teams())
        }

        async fn insert(
            &self,
            _collection: Collection,
            record: RawRecord,
        ) -> Result<RawRecord, RemoteError> {
            Ok(record)
        }

        async fn update(
            &self,
            _collection: Collection,
            _id: &EntityId,
            patch: RawRecord,
        ) -> Result<RawRecord, RemoteError> {
            Ok(patch)
        }

        async fn delete(&self, _collection: Collection, _id: &EntityId) -> Result<(), RemoteError> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_refreshes_share_one_fetch() {
        let client = Arc::new(SlowClient {
            fetches: AtomicUsize::new(0),
        });
        let cache: CollectionCache<Team> =
            CollectionCache::new(client.clone(), Arc::new(NoFallback), WINDOW);

        let (a, b, c) = tokio::join!(cache.refresh(), cache.refresh(), cache.ensure_loaded());

        assert_eq!(client.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(c.len(), 2);
    }
}
