//! fedhub Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the federation
//! data layer, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           fedhub-cli (CLI)              │
//! │        (Drives the DataFacade)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (DataFacade, CollectionCache,          │
//! │   OperationDispatcher)                  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (TableClient, FallbackProvider,         │
//! │  Notifier)                              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     fedhub-adapters (Infrastructure)    │
//! │ (MemoryTableClient, JsonDirTableClient, │
//! │  BuiltinFallback, notifiers)            │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Entities, normalizers, validation)    │
//! │              No I/O                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fedhub_core::prelude::*;
//!
//! # async fn run(client: Arc<dyn TableClient>, notifier: Arc<dyn Notifier>) {
//! // 1. Compose the facade with injected adapters
//! let facade = DataFacade::builder(client).notifier(notifier).build();
//!
//! // 2. Load what a view needs
//! facade.load_view(View::Home).await;
//!
//! // 3. Read snapshots, write through the dispatcher
//! let teams = facade.teams().read();
//! println!("{} teams", teams.data.len());
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AnyCollection, CacheEvent, CacheEventKind, CacheStatus, CollectionHandle,
        CollectionSnapshot, CollectionSummary, DataFacade, DataSource, Freshness,
        StalenessPolicy,
        error::{ApplicationError, RemoteError, RemoteErrorKind},
        ports::{FallbackProvider, Notifier, Outcome, Query, Severity, TableClient},
    };
    pub use crate::domain::{
        Club, Coach, Collection, Competition, Entity, EntityId, Event, Federation, Game,
        GameStatus, NewsItem, Player, RawRecord, Referee, RegionalAssociation, Team, View,
    };
    pub use crate::error::{FedError, FedResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
