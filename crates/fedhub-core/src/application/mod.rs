//! Application layer for fedhub.
//!
//! This layer contains:
//! - **Services**: collection caches, operation dispatchers, the data facade
//! - **Ports**: interface definitions (traits) for the remote, fallback data
//!   and notifications
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    AnyCollection, CacheEvent, CacheEventKind, CacheStatus, CollectionCache, CollectionHandle,
    CollectionSnapshot, CollectionSummary, DataFacade, DataFacadeBuilder, DataSource, Freshness,
    OperationDispatcher, StalenessPolicy,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FallbackProvider, Notifier, TableClient};

pub use error::{ApplicationError, RemoteError, RemoteErrorKind};
