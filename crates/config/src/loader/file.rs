//! JSON config file loading.
//!
//! Invariants:
//! - File settings are applied before environment variables (env vars take precedence).
//! - A configured path that does not exist is an error, not a silent fallback.
//! - Unknown keys are rejected so typos do not silently fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// On-disk configuration shape. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub skip_verify: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub max_retries: Option<usize>,
    pub index_mode: Option<String>,
}

impl FileConfig {
    /// Read and parse a config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileRead {
            path: path.to_path_buf(),
            kind: e.kind(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Apply the config file (if a path is set) to the loader.
///
/// File values only fill settings that are still unset, so this can run
/// after `from_env()` or builder overrides without clobbering them.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let Some(path) = loader.config_path().cloned() else {
        return Ok(());
    };

    tracing::debug!(path = %path.display(), "Loading config file");
    let file = FileConfig::read(&path)?;
    loader.fill_from_file(file);
    Ok(())
}
