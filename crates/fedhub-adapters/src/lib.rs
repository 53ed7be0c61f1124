//! Infrastructure adapters for fedhub.
//!
//! This crate implements the ports defined in `fedhub-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_fallback;
pub mod notifier;
pub mod table_client;

// Re-export commonly used adapters
pub use builtin_fallback::BuiltinFallback;
pub use notifier::{RecordingNotifier, TracingNotifier};
pub use table_client::{JsonDirTableClient, MemoryTableClient};
