//! Index template documents.
//!
//! [`IndexTemplate`] is the composable form (`PUT /_index_template/{name}`),
//! [`LegacyTemplate`] the pre-7.8 form (`PUT /_template/{name}`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Composable index template backing a data stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexTemplate {
    pub index_patterns: Vec<String>,
    pub priority: u32,
    pub data_stream: DataStreamConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composed_of: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_missing_component_templates: Option<bool>,
    pub template: TemplateBody,
    pub version: u32,
    #[serde(rename = "_meta")]
    pub meta: TemplateMeta,
}

/// Marker object that turns a composable template into a data stream template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStreamConfig {}

/// The `template` member of a composable template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBody {
    pub settings: TemplateSettings,
    pub mappings: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<DataStreamLifecycle>,
}

/// Data stream lifecycle block (8.11+).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStreamLifecycle {
    pub data_retention: String,
}

/// Index settings, serialized with flat dotted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    #[serde(
        rename = "index.mode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub index_mode: Option<String>,
    #[serde(
        rename = "index.routing_path",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub routing_path: Option<Vec<String>>,
    #[serde(
        rename = "index.lifecycle.name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lifecycle_name: Option<String>,
    #[serde(
        rename = "index.lifecycle.rollover_alias",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rollover_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMeta {
    pub managed_by: String,
}

/// Legacy index template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTemplate {
    pub index_patterns: Vec<String>,
    pub order: u32,
    pub settings: TemplateSettings,
    pub mappings: serde_json::Value,
    pub version: u32,
}

/// Body for `PUT /{index}` when bootstrapping a rollover write index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIndexBody {
    pub aliases: BTreeMap<String, AliasDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDefinition {
    pub is_write_index: bool,
}
