mod file_config;

pub use file_config::{FileConfig, ReconcilerConfig};

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SAVED_JOBS_INTERVAL_SECS: u64 = 3;
pub const DEFAULT_APPLICATIONS_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_BADGE_INTERVAL_SECS: u64 = 1;

/// CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub store_path: Option<PathBuf>,
    pub saved_jobs_interval_secs: u64,
    pub applications_interval_secs: u64,
    pub badge_interval_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            saved_jobs_interval_secs: DEFAULT_SAVED_JOBS_INTERVAL_SECS,
            applications_interval_secs: DEFAULT_APPLICATIONS_INTERVAL_SECS,
            badge_interval_secs: DEFAULT_BADGE_INTERVAL_SECS,
        }
    }
}

/// Polling cadence for the reconciler's re-read loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerSettings {
    pub saved_jobs_interval: Duration,
    pub applications_interval: Duration,
    pub badge_interval: Duration,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            saved_jobs_interval: Duration::from_secs(DEFAULT_SAVED_JOBS_INTERVAL_SECS),
            applications_interval: Duration::from_secs(DEFAULT_APPLICATIONS_INTERVAL_SECS),
            badge_interval: Duration::from_secs(DEFAULT_BADGE_INTERVAL_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub reconciler: ReconcilerSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let store_path = file
            .store_path
            .map(PathBuf::from)
            .or_else(|| cli.store_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("store_path must be specified via --store-path or in config file")
            })?;

        let reconciler_file = file.reconciler.unwrap_or_default();
        let reconciler = ReconcilerSettings {
            saved_jobs_interval: Duration::from_secs(
                reconciler_file
                    .saved_jobs_interval_secs
                    .unwrap_or(cli.saved_jobs_interval_secs),
            ),
            applications_interval: Duration::from_secs(
                reconciler_file
                    .applications_interval_secs
                    .unwrap_or(cli.applications_interval_secs),
            ),
            badge_interval: Duration::from_secs(
                reconciler_file
                    .badge_interval_secs
                    .unwrap_or(cli.badge_interval_secs),
            ),
        };

        Ok(Self {
            store_path,
            reconciler,
        })
    }
}
