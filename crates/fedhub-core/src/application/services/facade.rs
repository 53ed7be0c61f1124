//! Aggregating Facade - one entry point for every collection.
//!
//! The facade owns a [`CollectionHandle`] (cache + dispatcher) per entity
//! type. Consumers either use the typed accessors (`teams()`, `games()`, ...)
//! or, when the collection is only known at runtime, the type-erased
//! [`AnyCollection`] returned by [`DataFacade::collection`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{FallbackProvider, NoFallback, Notifier, SilentNotifier, TableClient},
        services::{
            collection_cache::{
                CacheEvent, CacheStatus, CollectionCache, CollectionSnapshot, DataSource,
                Freshness,
            },
            dispatcher::OperationDispatcher,
            staleness::StalenessPolicy,
        },
    },
    domain::{
        Club, Coach, Collection, Competition, Entity, EntityId, Event, Federation, Game,
        NewsItem, Player, RawRecord, Referee, RegionalAssociation, Team, View,
        catalog::view_collections,
    },
    error::FedResult,
};

/// Cache and dispatcher for one entity type.
pub struct CollectionHandle<T> {
    cache: CollectionCache<T>,
    dispatcher: OperationDispatcher<T>,
}

impl<T> Clone for CollectionHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<T: Entity> CollectionHandle<T> {
    pub fn new(
        client: Arc<dyn TableClient>,
        fallback: Arc<dyn FallbackProvider>,
        notifier: Arc<dyn Notifier>,
        staleness: &StalenessPolicy,
    ) -> Self {
        let cache = CollectionCache::new(
            Arc::clone(&client),
            fallback,
            staleness.window_for(T::COLLECTION),
        );
        let dispatcher = OperationDispatcher::new(client, cache.clone(), notifier);
        Self { cache, dispatcher }
    }

    /// See [`CollectionCache::read`].
    pub fn read(&self) -> CollectionSnapshot<T> {
        self.cache.read()
    }

    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        self.cache.snapshot()
    }

    pub async fn ensure_loaded(&self) -> CollectionSnapshot<T> {
        self.cache.ensure_loaded().await
    }

    pub async fn refresh(&self) -> CollectionSnapshot<T> {
        self.cache.refresh().await
    }

    /// A cached entity by id.
    pub fn get(&self, id: &EntityId) -> FedResult<T> {
        self.cache.get(id).ok_or_else(|| {
            ApplicationError::NotFound {
                collection: T::COLLECTION,
                id: id.clone(),
            }
            .into()
        })
    }

    pub async fn create(&self, draft: RawRecord) -> FedResult<T> {
        self.dispatcher.create(draft).await
    }

    pub async fn create_entity(&self, entity: &T) -> FedResult<T> {
        self.dispatcher.create_entity(entity).await
    }

    pub async fn update(&self, id: &EntityId, patch: RawRecord) -> FedResult<T> {
        self.dispatcher.update(id, patch).await
    }

    pub async fn delete(&self, id: &EntityId) -> FedResult<()> {
        self.dispatcher.delete(id).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.cache.subscribe()
    }

    pub fn cache(&self) -> &CollectionCache<T> {
        &self.cache
    }
}

/// State of one collection, without its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub collection: Collection,
    pub status: CacheStatus,
    pub freshness: Freshness,
    pub source: DataSource,
    pub count: usize,
    pub error: Option<String>,
}

impl<T> From<(Collection, &CollectionSnapshot<T>)> for CollectionSummary {
    fn from((collection, snapshot): (Collection, &CollectionSnapshot<T>)) -> Self {
        Self {
            collection,
            status: snapshot.status,
            freshness: snapshot.freshness,
            source: snapshot.source,
            count: snapshot.data.len(),
            error: snapshot.error.clone(),
        }
    }
}

/// A collection whose entity type is only known at runtime.
///
/// Entities cross this boundary as canonical records.
#[async_trait]
pub trait AnyCollection: Send + Sync {
    fn collection(&self) -> Collection;

    fn summary(&self) -> CollectionSummary;

    /// Cached entities as canonical records, in cache order.
    fn records(&self) -> Vec<RawRecord>;

    /// Id and one-line label of every cached entity.
    fn labels(&self) -> Vec<(EntityId, String)>;

    /// Fetch unless the cached data is fresh.
    async fn load(&self) -> CollectionSummary;

    async fn create(&self, draft: RawRecord) -> FedResult<RawRecord>;

    async fn update(&self, id: &EntityId, patch: RawRecord) -> FedResult<RawRecord>;

    async fn delete(&self, id: &EntityId) -> FedResult<()>;

    fn subscribe(&self) -> broadcast::Receiver<CacheEvent>;
}

#[async_trait]
impl<T: Entity> AnyCollection for CollectionHandle<T> {
    fn collection(&self) -> Collection {
        T::COLLECTION
    }

    fn summary(&self) -> CollectionSummary {
        (T::COLLECTION, &self.cache.snapshot()).into()
    }

    fn records(&self) -> Vec<RawRecord> {
        self.cache
            .snapshot()
            .data
            .iter()
            .map(Entity::to_record)
            .collect()
    }

    fn labels(&self) -> Vec<(EntityId, String)> {
        self.cache
            .snapshot()
            .data
            .iter()
            .map(|entity| (entity.id().clone(), entity.summary()))
            .collect()
    }

    async fn load(&self) -> CollectionSummary {
        let snapshot = match self.cache.freshness() {
            Freshness::Fresh => self.cache.snapshot(),
            Freshness::Stale | Freshness::Loading => self.cache.refresh().await,
        };
        (T::COLLECTION, &snapshot).into()
    }

    async fn create(&self, draft: RawRecord) -> FedResult<RawRecord> {
        Ok(self.dispatcher.create(draft).await?.to_record())
    }

    async fn update(&self, id: &EntityId, patch: RawRecord) -> FedResult<RawRecord> {
        Ok(self.dispatcher.update(id, patch).await?.to_record())
    }

    async fn delete(&self, id: &EntityId) -> FedResult<()> {
        self.dispatcher.delete(id).await
    }

    fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.cache.subscribe()
    }
}

/// Entry point to the data layer.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use fedhub_core::prelude::*;
///
/// # async fn run(client: Arc<dyn TableClient>) {
/// let facade = DataFacade::builder(client).build();
/// facade.load_view(View::Games).await;
///
/// let games = facade.games().read();
/// println!("{} games, loading: {}", games.data.len(), games.is_loading);
/// # }
/// ```
pub struct DataFacade {
    teams: CollectionHandle<Team>,
    clubs: CollectionHandle<Club>,
    players: CollectionHandle<Player>,
    games: CollectionHandle<Game>,
    competitions: CollectionHandle<Competition>,
    news: CollectionHandle<NewsItem>,
    events: CollectionHandle<Event>,
    referees: CollectionHandle<Referee>,
    federations: CollectionHandle<Federation>,
    regional_associations: CollectionHandle<RegionalAssociation>,
    coaches: CollectionHandle<Coach>,
}

impl DataFacade {
    pub fn builder(client: Arc<dyn TableClient>) -> DataFacadeBuilder {
        DataFacadeBuilder::new(client)
    }

    pub fn teams(&self) -> &CollectionHandle<Team> {
        &self.teams
    }

    pub fn clubs(&self) -> &CollectionHandle<Club> {
        &self.clubs
    }

    pub fn players(&self) -> &CollectionHandle<Player> {
        &self.players
    }

    pub fn games(&self) -> &CollectionHandle<Game> {
        &self.games
    }

    pub fn competitions(&self) -> &CollectionHandle<Competition> {
        &self.competitions
    }

    pub fn news(&self) -> &CollectionHandle<NewsItem> {
        &self.news
    }

    pub fn events(&self) -> &CollectionHandle<Event> {
        &self.events
    }

    pub fn referees(&self) -> &CollectionHandle<Referee> {
        &self.referees
    }

    pub fn federations(&self) -> &CollectionHandle<Federation> {
        &self.federations
    }

    pub fn regional_associations(&self) -> &CollectionHandle<RegionalAssociation> {
        &self.regional_associations
    }

    pub fn coaches(&self) -> &CollectionHandle<Coach> {
        &self.coaches
    }

    /// Type-erased handle for a collection named at runtime.
    pub fn collection(&self, collection: Collection) -> Arc<dyn AnyCollection> {
        match collection {
            Collection::Teams => Arc::new(self.teams.clone()),
            Collection::Clubs => Arc::new(self.clubs.clone()),
            Collection::Players => Arc::new(self.players.clone()),
            Collection::Games => Arc::new(self.games.clone()),
            Collection::Competitions => Arc::new(self.competitions.clone()),
            Collection::News => Arc::new(self.news.clone()),
            Collection::Events => Arc::new(self.events.clone()),
            Collection::Referees => Arc::new(self.referees.clone()),
            Collection::Federations => Arc::new(self.federations.clone()),
            Collection::RegionalAssociations => Arc::new(self.regional_associations.clone()),
            Collection::Coaches => Arc::new(self.coaches.clone()),
        }
    }

    /// Fetch the requested collections in parallel; others are not touched.
    ///
    /// Collections that are already fresh are not fetched again. Summaries
    /// come back in request order, duplicates removed.
    #[instrument(skip(self))]
    pub async fn load(&self, collections: &[Collection]) -> Vec<CollectionSummary> {
        let mut requested = Vec::with_capacity(collections.len());
        for collection in collections {
            if !requested.contains(collection) {
                requested.push(*collection);
            }
        }

        let mut tasks = JoinSet::new();
        for collection in &requested {
            let handle = self.collection(*collection);
            tasks.spawn(async move { handle.load().await });
        }

        let mut summaries = Vec::with_capacity(requested.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(summary) => {
                    debug!(collection = %summary.collection, count = summary.count, "loaded");
                    summaries.push(summary);
                }
                Err(e) => error!(error = %e, "collection load task failed"),
            }
        }
        summaries.sort_by_key(|summary| {
            requested
                .iter()
                .position(|c| *c == summary.collection)
                .unwrap_or(usize::MAX)
        });

        info!(collections = requested.len(), "load finished");
        summaries
    }

    /// Load the collections a view needs.
    pub async fn load_view(&self, view: View) -> Vec<CollectionSummary> {
        self.load(view_collections(view)).await
    }

    /// True while any of the given collections has a fetch in flight.
    pub fn is_loading(&self, collections: &[Collection]) -> bool {
        collections
            .iter()
            .any(|collection| self.collection(*collection).summary().status == CacheStatus::Loading)
    }

    /// Current state of the given collections, without fetching.
    pub fn summaries(&self, collections: &[Collection]) -> Vec<CollectionSummary> {
        collections
            .iter()
            .map(|collection| self.collection(*collection).summary())
            .collect()
    }
}

/// Builder for [`DataFacade`].
pub struct DataFacadeBuilder {
    client: Arc<dyn TableClient>,
    notifier: Arc<dyn Notifier>,
    fallback: Arc<dyn FallbackProvider>,
    staleness: StalenessPolicy,
}

impl DataFacadeBuilder {
    fn new(client: Arc<dyn TableClient>) -> Self {
        Self {
            client,
            notifier: Arc::new(SilentNotifier),
            fallback: Arc::new(NoFallback),
            staleness: StalenessPolicy::default(),
        }
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn fallback(mut self, fallback: Arc<dyn FallbackProvider>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn staleness(mut self, staleness: StalenessPolicy) -> Self {
        self.staleness = staleness;
        self
    }

    pub fn build(self) -> DataFacade {
        DataFacade {
            teams: self.handle(),
            clubs: self.handle(),
            players: self.handle(),
            games: self.handle(),
            competitions: self.handle(),
            news: self.handle(),
            events: self.handle(),
            referees: self.handle(),
            federations: self.handle(),
            regional_associations: self.handle(),
            coaches: self.handle(),
        }
    }

    fn handle<T: Entity>(&self) -> CollectionHandle<T> {
        CollectionHandle::new(
            Arc::clone(&self.client),
            Arc::clone(&self.fallback),
            Arc::clone(&self.notifier),
            &self.staleness,
        )
    }
}
