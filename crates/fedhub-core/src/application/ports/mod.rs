//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `fedhub-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TableClient`: reads and writes rows of the hosted data service
//!   - `FallbackProvider`: static placeholder rows per collection
//!   - `Notifier`: reports the outcome of each mutation to the user
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The `DataFacade` service; the CLI drives it)

pub mod output;

pub use output::{
    FallbackProvider, NoFallback, Notifier, OrderBy, Outcome, Query, Severity, SilentNotifier,
    TableClient,
};

#[cfg(test)]
pub use output::{MockFallbackProvider, MockNotifier, MockTableClient};
