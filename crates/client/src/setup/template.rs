//! Index template rendering.
//!
//! Datastream mode yields a composable [`IndexTemplate`] whose optional
//! fields follow the capability profile. Legacy mode yields a
//! [`LegacyTemplate`] whose shape only ever varies by ILM policy name.

use serde_json::{Value, json};

use crate::endpoints::paths;
use crate::models::{
    DataStreamConfig, DataStreamLifecycle, IndexTemplate, LegacyTemplate, TemplateBody,
    TemplateMeta, TemplateSettings,
};
use crate::setup::capabilities::{CapabilityProfile, LifecycleStrategy};
use crate::setup::mode::IndexMode;
use crate::setup::names::{
    DATASTREAM_CUSTOM_COMPONENT_TEMPLATE, DATASTREAM_DATA_RETENTION, DATASTREAM_INDEX_PATTERN,
    DATASTREAM_TEMPLATE_NAME, DATASTREAM_TEMPLATE_PRIORITY, LEGACY_INDEX_PATTERN,
    LEGACY_TEMPLATE_NAME, LEGACY_WRITE_ALIAS, MANAGED_BY, METRICS_ILM_POLICY_NAME,
    TEMPLATE_VERSION,
};

const TIME_SERIES_DIMENSION: &str = "entity.id";

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSpec {
    Modern(IndexTemplate),
    Legacy(LegacyTemplate),
}

impl TemplateSpec {
    pub fn name(&self) -> &'static str {
        match self {
            TemplateSpec::Modern(_) => DATASTREAM_TEMPLATE_NAME,
            TemplateSpec::Legacy(_) => LEGACY_TEMPLATE_NAME,
        }
    }

    /// `/_index_template/{name}` or `/_template/{name}`.
    pub fn path(&self) -> String {
        match self {
            TemplateSpec::Modern(_) => paths::index_template(self.name()),
            TemplateSpec::Legacy(_) => paths::legacy_template(self.name()),
        }
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            TemplateSpec::Modern(t) => serde_json::to_value(t),
            TemplateSpec::Legacy(t) => serde_json::to_value(t),
        }
    }
}

/// Render the template for `mode`.
///
/// `ilm_applied` says whether the ILM phase left the policy in place; the
/// datastream template only references the policy when it did.
pub fn render(mode: IndexMode, profile: &CapabilityProfile, ilm_applied: bool) -> TemplateSpec {
    match mode {
        IndexMode::Datastream => TemplateSpec::Modern(render_datastream(profile, ilm_applied)),
        IndexMode::Legacy => TemplateSpec::Legacy(render_legacy()),
    }
}

fn render_datastream(profile: &CapabilityProfile, ilm_applied: bool) -> IndexTemplate {
    let (lifecycle, lifecycle_name) = match profile.lifecycle_strategy() {
        LifecycleStrategy::DataStreamLifecycle => (
            Some(DataStreamLifecycle {
                data_retention: DATASTREAM_DATA_RETENTION.to_string(),
            }),
            None,
        ),
        LifecycleStrategy::Ilm if ilm_applied => (None, Some(METRICS_ILM_POLICY_NAME.to_string())),
        LifecycleStrategy::Ilm | LifecycleStrategy::None => (None, None),
    };

    let tsds = profile.supports_time_series_datastream;
    let settings = TemplateSettings {
        index_mode: tsds.then(|| "time_series".to_string()),
        routing_path: tsds.then(|| vec![TIME_SERIES_DIMENSION.to_string()]),
        lifecycle_name,
        rollover_alias: None,
    };

    let composition = profile.supports_component_template_composition;

    IndexTemplate {
        index_patterns: vec![DATASTREAM_INDEX_PATTERN.to_string()],
        priority: DATASTREAM_TEMPLATE_PRIORITY,
        data_stream: DataStreamConfig::default(),
        composed_of: composition.then(|| vec![DATASTREAM_CUSTOM_COMPONENT_TEMPLATE.to_string()]),
        ignore_missing_component_templates: composition.then_some(true),
        template: TemplateBody {
            settings,
            mappings: telemetry_mappings(tsds),
            lifecycle,
        },
        version: TEMPLATE_VERSION,
        meta: TemplateMeta {
            managed_by: MANAGED_BY.to_string(),
        },
    }
}

fn render_legacy() -> LegacyTemplate {
    LegacyTemplate {
        index_patterns: vec![LEGACY_INDEX_PATTERN.to_string()],
        order: 0,
        settings: TemplateSettings {
            lifecycle_name: Some(METRICS_ILM_POLICY_NAME.to_string()),
            rollover_alias: Some(LEGACY_WRITE_ALIAS.to_string()),
            ..Default::default()
        },
        mappings: telemetry_mappings(false),
        version: TEMPLATE_VERSION,
    }
}

/// Field mappings for telemetry documents. Dimension and metric markers are
/// only valid on time series indices.
fn telemetry_mappings(time_series: bool) -> Value {
    let mut entity_id = json!({"type": "keyword"});
    let mut numeric_value = json!({"type": "double"});
    if time_series {
        entity_id["time_series_dimension"] = json!(true);
        numeric_value["time_series_metric"] = json!("gauge");
    }

    json!({
        "dynamic_templates": [
            {
                "strings_as_keyword": {
                    "match_mapping_type": "string",
                    "mapping": {"type": "keyword", "ignore_above": 1024}
                }
            }
        ],
        "properties": {
            "@timestamp": {"type": "date"},
            "entity": {
                "properties": {
                    "id": entity_id,
                    "domain": {"type": "keyword"},
                    "friendly_name": {"type": "keyword"}
                }
            },
            "value": {
                "properties": {
                    "number": numeric_value,
                    "text": {"type": "keyword"}
                }
            }
        }
    })
}
