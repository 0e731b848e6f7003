//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--data-file`, `--no-color`; handled at the call-site)
//! 2. Environment variables: `SALESDESK_STORAGE__PATH`, `SALESDESK_FORMS__DATE_FORMAT`, ...
//! 3. Config file (`--config FILE`, or [`AppConfig::config_path`] if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use salesdesk_core::forms::utils::{DEFAULT_DATE_FORMAT, is_valid_date_format};

/// Prefix of the environment variables read by [`AppConfig::load`].
pub const ENV_PREFIX: &str = "SALESDESK";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where records are kept.
    pub storage: StorageConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Form settings.
    pub forms: FormsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// JSON data file, used by the `json` backend.
    pub path: PathBuf,
    /// Add sample departments to an empty store.
    pub seed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON data file.
    Json,
    /// Process memory; records are gone when the command exits.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// `chrono` pattern for birth dates.
    pub date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::Json,
                path: Self::default_data_path(),
                seed: true,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            forms: FormsConfig {
                date_format: DEFAULT_DATE_FORMAT.into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist.  Without it the default location is read if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path().as_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Invalid built-in defaults")?)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let loaded: Self = config
            .try_deserialize()
            .context("Configuration has invalid values")?;
        if !is_valid_date_format(&loaded.forms.date_format) {
            anyhow::bail!(
                "forms.date_format '{}' cannot render and read back a date",
                loaded.forms.date_format
            );
        }
        debug!(?loaded, "Configuration loaded");
        Ok(loaded)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.salesdesk.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "salesdesk", "salesdesk")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".salesdesk.toml"))
    }

    /// Default JSON data file in the platform data directory.
    pub fn default_data_path() -> PathBuf {
        directories::ProjectDirs::from("com", "salesdesk", "salesdesk")
            .map(|d| d.data_dir().join("salesdesk.json"))
            .unwrap_or_else(|| PathBuf::from("salesdesk.json"))
    }

    /// Replace the data file, e.g. from `--data-file`.
    pub fn with_data_file(mut self, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            self.storage.path = path.to_path_buf();
        }
        self
    }
}
