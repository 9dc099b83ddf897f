//! Engine settings, read from an optional JSON file and the environment.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const STORAGE_DIR_ENV: &str = "KIROKU_STORAGE_DIR";
pub const API_BASE_URL_ENV: &str = "KIROKU_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Directory `FileStorage` writes tracker logs to.
    pub storage_dir: PathBuf,
    /// Base URL of the check-in backend. Transport is not part of this crate.
    pub api_base_url: Option<String>,
    /// Reject flows containing field types without a renderer instead of
    /// rendering placeholders.
    pub strict_config: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".kiroku"),
            api_base_url: None,
            strict_config: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads `path` if given (defaults otherwise), then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Applies overrides from a variable lookup. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(STORAGE_DIR_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(storage_dir = %dir, "storage dir overridden from environment");
            self.storage_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.api_base_url = Some(url);
        }
    }
}
