//! Configuration loading.
//!
//! Settings live in a small INI file; absent files and absent keys fall
//! back to defaults, so a bare install runs with no config at all.

mod parser;
mod settings;

pub use settings::{CacheSettings, LoggingSettings, Settings, StoreSettings, TimelineSettings};

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default location of the config file, under the per-user config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("answerglance")
        .join("config.ini")
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read or parsed as INI
    #[error("failed to read config file: {0}")]
    Read(#[from] ini::Error),

    /// A key held a value that does not parse or validate
    #[error("invalid value for [{section}] {key}: '{value}' ({reason})")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl Settings {
    /// Load settings from an INI file, overlaying defaults.
    ///
    /// A missing file is not an error; it yields [`Settings::default`].
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Settings::default());
        }

        let ini = Ini::load_from_file(path)?;
        parser::parse_ini(&ini)
    }
}
