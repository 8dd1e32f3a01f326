//! Fixed resource names and lifecycle thresholds.

/// ILM policy shared by both modes.
pub const METRICS_ILM_POLICY_NAME: &str = "metrics-telemetry";

pub const DATASTREAM_TEMPLATE_NAME: &str = "metrics-telemetry";
pub const DATASTREAM_INDEX_PATTERN: &str = "metrics-telemetry.*-*";
pub const DATASTREAM_CUSTOM_COMPONENT_TEMPLATE: &str = "metrics-telemetry@custom";
pub const DATASTREAM_TEMPLATE_PRIORITY: u32 = 500;
pub const DATASTREAM_DATA_RETENTION: &str = "365d";

pub const LEGACY_TEMPLATE_NAME: &str = "telemetry-index-template-v4";
pub const LEGACY_INDEX_PATTERN: &str = "telemetry-v4*";
pub const LEGACY_WRITE_ALIAS: &str = "active-telemetry-index-v4";
pub const LEGACY_INITIAL_INDEX: &str = "telemetry-v4-000001";

pub const ROLLOVER_MAX_AGE: &str = "30d";
pub const ROLLOVER_MAX_PRIMARY_SHARD_SIZE: &str = "50gb";
pub const DELETE_AFTER: &str = "365d";

/// Bumped whenever the rendered documents change shape.
pub const TEMPLATE_VERSION: u32 = 1;
pub const MANAGED_BY: &str = "estack";
