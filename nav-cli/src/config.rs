//! Navigator configuration loading from `.navrc.toml`.
//!
//! The file is optional; every missing section or key falls back to a default.
//! Command-line flags override whatever is configured here.
//!
//! # Example Configuration
//!
//! ```toml
//! [database]
//! path = ".nav/navigator.duckdb"
//! pool_size = 4
//! acquire_timeout_ms = 2000
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use nav_store::PoolConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".navrc.toml";

/// Database location used when neither the config nor `--db` names one.
pub const DEFAULT_DB_PATH: &str = ".nav/navigator.duckdb";

/// Root configuration structure loaded from `.navrc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct NavConfig {
    /// Database location and connection pool settings.
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct DatabaseSettings {
    /// Path to the DuckDB file, relative to the working directory.
    #[serde(default)]
    pub path: Option<String>,

    /// Number of pooled connections.
    ///
    /// Default: 10
    #[serde(default)]
    pub pool_size: Option<usize>,

    /// How long a reload waits for a free connection, in milliseconds.
    ///
    /// Default: 6000
    #[serde(default)]
    pub acquire_timeout_ms: Option<u64>,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Unset means auto-detect from the TTY.
    #[serde(default)]
    pub color: Option<bool>,
}

impl NavConfig {
    /// Load configuration from `.navrc.toml` in the given directory.
    ///
    /// A missing file yields defaults. Read or parse failures are logged as
    /// warnings and also yield defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Database path, or the default location.
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(self.database.path.as_deref().unwrap_or(DEFAULT_DB_PATH))
    }

    /// Pool settings with configured values over the built-in defaults.
    pub fn pool_config(&self) -> PoolConfig {
        let defaults = PoolConfig::default();
        PoolConfig {
            size: self.database.pool_size.unwrap_or(defaults.size),
            acquire_timeout: self
                .database
                .acquire_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.acquire_timeout),
        }
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Configured color preference, or `None` to auto-detect.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
