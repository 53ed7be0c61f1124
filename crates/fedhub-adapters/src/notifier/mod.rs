//! Notifier adapters.

pub mod memory;
pub mod logging;

pub use memory::RecordingNotifier;
pub use logging::TracingNotifier;
