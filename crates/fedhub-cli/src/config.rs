//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the values derived from
//! it (the data directory and the [`StalenessPolicy`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--data-dir`, `--no-color`; handled at the call-site)
//! 2. Environment variables: `FEDHUB_<SECTION>__<KEY>`, e.g.
//!    `FEDHUB_CACHE__SHORT_SECS=30`
//! 3. Config file (`--config`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use fedhub_core::application::StalenessPolicy;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the table files live.
    pub data: DataConfig,
    /// Staleness windows, per volatility class.
    pub cache: CacheConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub short_secs: u64,
    pub medium_secs: u64,
    pub long_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let staleness = StalenessPolicy::default();
        Self {
            data: DataConfig {
                dir: Self::default_data_dir(),
            },
            cache: CacheConfig {
                short_secs: staleness.short.as_secs(),
                medium_secs: staleness.medium.as_secs(),
                long_secs: staleness.long.as_secs(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `FEDHUB_*`.
    ///
    /// A file named with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to encode default configuration")?;

        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix("FEDHUB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.fedhub.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("cv", "fedhub", "fedhub")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".fedhub.toml"))
    }

    fn default_data_dir() -> PathBuf {
        directories::ProjectDirs::from("cv", "fedhub", "fedhub")
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// The data directory, letting `--data-dir` win over the config.
    pub fn data_dir<'a>(&'a self, flag: Option<&'a Path>) -> &'a Path {
        flag.unwrap_or(&self.data.dir)
    }

    pub fn staleness(&self) -> StalenessPolicy {
        StalenessPolicy {
            short: Duration::from_secs(self.cache.short_secs),
            medium: Duration::from_secs(self.cache.medium_secs),
            long: Duration::from_secs(self.cache.long_secs),
        }
    }
}
