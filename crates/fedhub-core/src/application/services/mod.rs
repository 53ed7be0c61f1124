//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports: caching collections,
//! dispatching writes and aggregating everything behind one facade.

pub mod collection_cache;
pub mod dispatcher;
pub mod facade;
pub mod staleness;

pub use collection_cache::{
    CacheEvent, CacheEventKind, CacheStatus, CollectionCache, CollectionSnapshot, DataSource,
    Freshness,
};
pub use dispatcher::OperationDispatcher;
pub use facade::{AnyCollection, CollectionHandle, CollectionSummary, DataFacade, DataFacadeBuilder};
pub use staleness::StalenessPolicy;
