//! Collection-specific staleness windows.

use std::time::Duration;

use crate::domain::{Collection, Volatility};

/// How long cached data stays fresh, per volatility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    /// Games, news.
    pub short: Duration,
    /// Teams, clubs, players, competitions, events, referees, coaches.
    pub medium: Duration,
    /// Federations, regional associations.
    pub long: Duration,
}

impl StalenessPolicy {
    pub const DEFAULT_SHORT: Duration = Duration::from_secs(2 * 60);
    pub const DEFAULT_MEDIUM: Duration = Duration::from_secs(5 * 60);
    pub const DEFAULT_LONG: Duration = Duration::from_secs(30 * 60);

    pub fn window_for(&self, collection: Collection) -> Duration {
        match collection.volatility() {
            Volatility::High => self.short,
            Volatility::Medium => self.medium,
            Volatility::Low => self.long,
        }
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            short: Self::DEFAULT_SHORT,
            medium: Self::DEFAULT_MEDIUM,
            long: Self::DEFAULT_LONG,
        }
    }
}
