//! Index setup configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_INDEX_MODE;

/// Index setup settings.
///
/// `mode` is kept as the operator's raw text. Parsing into a typed mode is the
/// setup core's job, so an unknown value is reported as a configuration error
/// by the component that enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Requested ingestion mode (`datastream` or `legacy`).
    pub mode: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_INDEX_MODE.to_string(),
        }
    }
}
