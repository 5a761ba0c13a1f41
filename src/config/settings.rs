//! Settings loading from config.toml
//!
//! Every setting has a default, so a missing config file is fine. The file
//! location is taken from `BILLEASE_CONFIG` and the data directory can be
//! overridden with `BILLEASE_DATA_DIR`.

use crate::entities::InvoiceDefaults;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the settings file
pub const CONFIG_PATH_VAR: &str = "BILLEASE_CONFIG";
/// Environment variable overriding [`Settings::data_dir`]
pub const DATA_DIR_VAR: &str = "BILLEASE_DATA_DIR";
/// Settings file used when [`CONFIG_PATH_VAR`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory the saved invoices live in
    pub data_dir: PathBuf,
    /// Storage key of the saved collection
    pub storage_key: String,
    /// Tax rates for new bills
    pub defaults: InvoiceDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_key: "invoices".to_string(),
            defaults: InvoiceDefaults::default(),
        }
    }
}

impl Settings {
    /// Loads settings from the process environment and the settings file.
    pub fn load() -> Result<Self> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Loads settings, resolving environment variables through `lookup`.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(CONFIG_PATH_VAR).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let mut settings = Self::from_path(&path)?;
        settings.apply_overrides(lookup);
        Ok(settings)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No settings file at {:?}; using defaults", path);
            return Ok(Self::default());
        }

        debug!("Loading settings from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read settings file {path:?}: {e}"),
        })?;
        Self::parse(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse settings file {path:?}: {e}"),
        })
    }

    /// Parses settings from TOML text.
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_dir) = lookup(DATA_DIR_VAR).filter(|value| !value.trim().is_empty()) {
            debug!("{DATA_DIR_VAR} overrides data_dir with {data_dir}");
            self.data_dir = PathBuf::from(data_dir);
        }
    }
}
