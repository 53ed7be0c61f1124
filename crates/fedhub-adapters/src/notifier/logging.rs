//! Notifier that writes outcomes to the log.

use tracing::{info, warn};

use fedhub_core::application::ports::{Notifier, Outcome, Severity};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn report(&self, outcome: Outcome) {
        match outcome.severity {
            Severity::Success => info!(title = %outcome.title, "{}", outcome.description),
            Severity::Destructive => warn!(title = %outcome.title, "{}", outcome.description),
        }
    }
}
