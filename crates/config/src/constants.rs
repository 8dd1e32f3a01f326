//! Centralized constants for the estack workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default Elasticsearch HTTP port.
pub const DEFAULT_ES_PORT: u16 = 9200;

/// Default maximum number of retries for failed requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound for the retry budget accepted from configuration.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Index Defaults
// =============================================================================

/// Index mode used when nothing is configured.
pub const DEFAULT_INDEX_MODE: &str = "datastream";
