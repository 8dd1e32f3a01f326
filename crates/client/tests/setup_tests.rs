//! Orchestrator behavior against an in-memory cluster.
//!
//! # Invariants
//! - Rejected modes never reach `send`
//! - ILM failures stop the run before the template phase
//! - Datastream templates are written every run, legacy templates once
//! - Legacy ILM policies are written every run, datastream ILM policies once

mod common;

use common::*;
use estack_client::setup::{ConfigurationError, LifecycleStrategy, names};
use estack_client::{
    ClusterDescriptor, IndexManager, IndexMode, MetricsCollector, PhaseOutcome, SetupError, Version,
};
use reqwest::Method;
use serde_json::json;

const ILM_PATH: &str = "/_ilm/policy/metrics-telemetry";
const DATASTREAM_TEMPLATE_PATH: &str = "/_index_template/metrics-telemetry";
const LEGACY_TEMPLATE_PATH: &str = "/_template/telemetry-index-template-v4";
const WRITE_INDEX_PATH: &str = "/telemetry-v4-000001";
const ALIAS_PATH: &str = "/_alias/active-telemetry-index-v4";

fn self_managed(major: u32, minor: u32, patch: u32) -> ScriptedGateway {
    ScriptedGateway::new(ClusterDescriptor::self_managed(Version::new(
        major, minor, patch,
    )))
}

fn serverless() -> ScriptedGateway {
    ScriptedGateway::new(ClusterDescriptor::serverless(Version::new(8, 11, 0)))
}

#[tokio::test]
async fn test_invalid_index_mode_fails_before_any_request() {
    let result = IndexManager::from_mode_str(self_managed(8, 8, 0), "invalid_mode");

    let err = result.err().expect("invalid mode must be rejected");
    assert!(matches!(
        err,
        SetupError::Configuration(ConfigurationError::InvalidIndexMode(ref m)) if m == "invalid_mode"
    ));
}

#[tokio::test]
async fn test_legacy_mode_on_serverless_is_rejected_without_requests() {
    let manager = IndexManager::new(serverless(), IndexMode::Legacy);

    let err = manager.setup().await.unwrap_err();

    assert!(matches!(
        err,
        SetupError::Configuration(ConfigurationError::LegacyModeUnsupported)
    ));
    assert!(manager.gateway().requests().is_empty());
}

#[tokio::test]
async fn test_datastream_serverless() {
    let manager = IndexManager::new(serverless(), IndexMode::Datastream);

    let report = manager.setup().await.unwrap();

    let gw = manager.gateway();
    assert!(gw.requests_to(Method::GET, ILM_PATH).is_empty());
    assert!(gw.puts_to(ILM_PATH).is_empty());

    let templates = gw.puts_to(DATASTREAM_TEMPLATE_PATH);
    assert_eq!(templates.len(), 1);
    let settings = &templates[0]["template"]["settings"];
    assert_eq!(settings["index.mode"], "time_series");
    assert!(settings.get("index.lifecycle.name").is_none());
    assert!(templates[0]["template"].get("lifecycle").is_none());

    assert_eq!(report.ilm_policy, PhaseOutcome::NotApplicable);
    assert_eq!(report.lifecycle, LifecycleStrategy::None);
    assert_eq!(report.write_alias, PhaseOutcome::NotApplicable);
}

#[tokio::test]
async fn test_datastream_8_11_uses_data_stream_lifecycle() {
    let manager = IndexManager::new(self_managed(8, 11, 0), IndexMode::Datastream);

    manager.setup().await.unwrap();

    let gw = manager.gateway();
    assert!(gw.requests_to(Method::GET, ILM_PATH).is_empty());
    assert!(gw.puts_to(ILM_PATH).is_empty());

    let templates = gw.puts_to(DATASTREAM_TEMPLATE_PATH);
    assert_eq!(templates.len(), 1);
    let template = &templates[0];
    assert_eq!(template["template"]["lifecycle"]["data_retention"], "365d");
    assert!(
        template["template"]["settings"]
            .get("index.lifecycle.name")
            .is_none()
    );
    assert_eq!(template["ignore_missing_component_templates"], true);
    assert_eq!(template["composed_of"], json!(["metrics-telemetry@custom"]));
    assert_eq!(template["template"]["settings"]["index.mode"], "time_series");
}

#[tokio::test]
async fn test_datastream_8_8_uses_ilm() {
    let manager = IndexManager::new(self_managed(8, 8, 0), IndexMode::Datastream);

    let report = manager.setup().await.unwrap();

    let gw = manager.gateway();
    let policies = gw.puts_to(ILM_PATH);
    assert_eq!(policies.len(), 1);
    assert_eq!(
        policies[0]["policy"]["phases"]["hot"]["actions"]["rollover"]["max_primary_shard_size"],
        "50gb"
    );

    let templates = gw.puts_to(DATASTREAM_TEMPLATE_PATH);
    assert_eq!(templates.len(), 1);
    let template = &templates[0];
    assert_eq!(
        template["template"]["settings"]["index.lifecycle.name"],
        names::METRICS_ILM_POLICY_NAME
    );
    assert!(template["template"].get("lifecycle").is_none());
    assert_eq!(template["ignore_missing_component_templates"], true);
    assert!(template.get("composed_of").is_some());
    assert_eq!(template["template"]["settings"]["index.mode"], "time_series");

    assert_eq!(report.ilm_policy, PhaseOutcome::Created);
    assert_eq!(report.template, PhaseOutcome::Updated);
}

#[tokio::test]
async fn test_datastream_8_0_uses_ilm_and_tsds() {
    let manager = IndexManager::new(self_managed(8, 0, 0), IndexMode::Datastream);

    manager.setup().await.unwrap();

    let gw = manager.gateway();
    let policies = gw.puts_to(ILM_PATH);
    assert_eq!(policies.len(), 1);
    assert_eq!(
        policies[0]["policy"]["phases"]["hot"]["actions"]["rollover"]["max_primary_shard_size"],
        "50gb"
    );

    let template = &gw.puts_to(DATASTREAM_TEMPLATE_PATH)[0];
    assert_eq!(template["template"]["settings"]["index.mode"], "time_series");
    assert!(template.get("composed_of").is_some());
}

#[tokio::test]
async fn test_datastream_7_17() {
    let manager = IndexManager::new(self_managed(7, 17, 0), IndexMode::Datastream);

    manager.setup().await.unwrap();

    let gw = manager.gateway();
    let policies = gw.puts_to(ILM_PATH);
    assert_eq!(policies.len(), 1);
    assert_eq!(
        policies[0]["policy"]["phases"]["hot"]["actions"]["rollover"]["max_primary_shard_size"],
        "50gb"
    );

    let template = &gw.puts_to(DATASTREAM_TEMPLATE_PATH)[0];
    assert_eq!(
        template["template"]["settings"]["index.lifecycle.name"],
        names::METRICS_ILM_POLICY_NAME
    );
    assert!(template.get("ignore_missing_component_templates").is_none());
    assert!(template.get("composed_of").is_none());
    assert!(template["template"]["settings"].get("index.mode").is_none());
}

#[tokio::test]
async fn test_datastream_7_11() {
    let manager = IndexManager::new(self_managed(7, 11, 0), IndexMode::Datastream);

    manager.setup().await.unwrap();

    let gw = manager.gateway();
    let policies = gw.puts_to(ILM_PATH);
    assert_eq!(policies.len(), 1);
    assert!(
        policies[0]["policy"]["phases"]["hot"]["actions"]["rollover"]
            .get("max_primary_shard_size")
            .is_none()
    );

    let template = &gw.puts_to(DATASTREAM_TEMPLATE_PATH)[0];
    assert_eq!(
        template["template"]["settings"]["index.lifecycle.name"],
        names::METRICS_ILM_POLICY_NAME
    );
    assert!(template.get("ignore_missing_component_templates").is_none());
    assert!(template.get("composed_of").is_none());
    assert!(template["template"]["settings"].get("index.mode").is_none());
}

#[tokio::test]
async fn test_datastream_existing_policy_is_left_alone() {
    let gateway = self_managed(8, 8, 0).with_resource(ILM_PATH, json!({"policy": {}}));
    let manager = IndexManager::new(gateway, IndexMode::Datastream);

    let report = manager.setup().await.unwrap();

    let gw = manager.gateway();
    assert_eq!(gw.requests_to(Method::GET, ILM_PATH).len(), 1);
    assert!(gw.puts_to(ILM_PATH).is_empty());
    assert_eq!(report.ilm_policy, PhaseOutcome::Skipped);

    // The template still references the policy that is already there.
    let template = &gw.puts_to(DATASTREAM_TEMPLATE_PATH)[0];
    assert_eq!(
        template["template"]["settings"]["index.lifecycle.name"],
        names::METRICS_ILM_POLICY_NAME
    );
}

#[tokio::test]
async fn test_datastream_template_is_updated_every_run() {
    let gateway = self_managed(8, 8, 0)
        .with_resource(DATASTREAM_TEMPLATE_PATH, json!({"index_patterns": ["old-*"]}));
    let manager = IndexManager::new(gateway, IndexMode::Datastream);

    for run in 1..=3 {
        manager.setup().await.unwrap();
        assert_eq!(manager.gateway().puts_to(DATASTREAM_TEMPLATE_PATH).len(), run);
    }

    // Only the first run had to create the policy.
    assert_eq!(manager.gateway().puts_to(ILM_PATH).len(), 1);
    let stored = manager.gateway().resource(DATASTREAM_TEMPLATE_PATH).unwrap();
    assert_eq!(stored["index_patterns"], json!(["metrics-telemetry.*-*"]));
}

#[tokio::test]
async fn test_datastream_ilm_failure_skips_template_phase() {
    let gateway = self_managed(8, 8, 0).fail(Method::PUT, ILM_PATH, 400);
    let manager = IndexManager::new(gateway, IndexMode::Datastream);

    let err = manager.setup().await.unwrap_err();

    // Surfaced unwrapped.
    assert!(matches!(err, SetupError::Cluster(_)));
    assert_eq!(err.client_error().and_then(|e| e.status()), Some(400));
    assert!(
        manager
            .gateway()
            .requests_to(Method::PUT, DATASTREAM_TEMPLATE_PATH)
            .is_empty()
    );
}

#[tokio::test]
async fn test_datastream_ilm_lookup_failure_is_not_treated_as_absent() {
    let gateway = self_managed(8, 8, 0).fail(Method::GET, ILM_PATH, 403);
    let manager = IndexManager::new(gateway, IndexMode::Datastream);

    let err = manager.setup().await.unwrap_err();

    assert!(matches!(err, SetupError::Cluster(ref e) if e.is_permission_error()));
    assert!(manager.gateway().puts_to(ILM_PATH).is_empty());
    assert!(manager.gateway().puts_to(DATASTREAM_TEMPLATE_PATH).is_empty());
}

#[tokio::test]
async fn test_datastream_template_error_is_wrapped() {
    let gateway = self_managed(8, 8, 0).fail(Method::PUT, DATASTREAM_TEMPLATE_PATH, 400);
    let manager = IndexManager::new(gateway, IndexMode::Datastream);

    let err = manager.setup().await.unwrap_err();

    match err {
        SetupError::TemplatePhase { template, source } => {
            assert_eq!(template, names::DATASTREAM_TEMPLATE_NAME);
            assert_eq!(source.status(), Some(400));
        }
        other => panic!("expected template phase error, got {other:?}"),
    }
    // The policy written before the failure stays.
    assert!(manager.gateway().resource(ILM_PATH).is_some());
}

#[tokio::test]
async fn test_legacy_8_8_first_run() {
    let manager = IndexManager::new(self_managed(8, 8, 0), IndexMode::Legacy);

    let report = manager.setup().await.unwrap();

    let gw = manager.gateway();
    let policies = gw.puts_to(ILM_PATH);
    assert_eq!(policies.len(), 1);
    assert_eq!(
        policies[0]["policy"]["phases"]["hot"]["actions"]["rollover"]["max_primary_shard_size"],
        "50gb"
    );

    let templates = gw.puts_to(LEGACY_TEMPLATE_PATH);
    assert_eq!(templates.len(), 1);
    let template = &templates[0];
    assert_eq!(
        template["settings"]["index.lifecycle.name"],
        names::METRICS_ILM_POLICY_NAME
    );
    assert!(template.get("template").is_none());
    assert!(template["settings"].get("index.mode").is_none());
    assert!(template.get("composed_of").is_none());
    assert!(template.get("ignore_missing_component_templates").is_none());
    assert!(gw.puts_to(DATASTREAM_TEMPLATE_PATH).is_empty());

    let write_index = gw.puts_to(WRITE_INDEX_PATH);
    assert_eq!(
        write_index,
        vec![json!({"aliases": {"active-telemetry-index-v4": {"is_write_index": true}}})]
    );

    assert_eq!(report.ilm_policy, PhaseOutcome::Updated);
    assert_eq!(report.template, PhaseOutcome::Created);
    assert_eq!(report.write_alias, PhaseOutcome::Created);
}

#[tokio::test]
async fn test_legacy_7_11() {
    let manager = IndexManager::new(self_managed(7, 11, 0), IndexMode::Legacy);

    manager.setup().await.unwrap();

    let gw = manager.gateway();
    let policies = gw.puts_to(ILM_PATH);
    assert_eq!(policies.len(), 1);
    assert!(
        policies[0]["policy"]["phases"]["hot"]["actions"]["rollover"]
            .get("max_primary_shard_size")
            .is_none()
    );

    let template = &gw.puts_to(LEGACY_TEMPLATE_PATH)[0];
    assert_eq!(
        template["settings"]["index.lifecycle.name"],
        names::METRICS_ILM_POLICY_NAME
    );
    assert!(template["settings"].get("index.mode").is_none());
}

#[tokio::test]
async fn test_legacy_existing_template_is_not_rewritten() {
    let gateway = self_managed(8, 8, 0)
        .with_resource(LEGACY_TEMPLATE_PATH, json!({"order": 0}))
        .with_resource(ALIAS_PATH, json!({}));
    let manager = IndexManager::new(gateway, IndexMode::Legacy);

    let report = manager.setup().await.unwrap();

    let gw = manager.gateway();
    assert!(gw.puts_to(LEGACY_TEMPLATE_PATH).is_empty());
    assert_eq!(gw.puts_to(ILM_PATH).len(), 1);
    assert!(gw.puts_to(WRITE_INDEX_PATH).is_empty());
    assert_eq!(report.template, PhaseOutcome::Skipped);
    assert_eq!(report.write_alias, PhaseOutcome::Skipped);
}

#[tokio::test]
async fn test_legacy_repeated_runs() {
    let manager = IndexManager::new(self_managed(8, 8, 0), IndexMode::Legacy);

    for _ in 0..3 {
        manager.setup().await.unwrap();
    }

    let gw = manager.gateway();
    assert_eq!(gw.puts_to(ILM_PATH).len(), 3);
    assert_eq!(gw.puts_to(LEGACY_TEMPLATE_PATH).len(), 1);
    assert_eq!(gw.puts_to(WRITE_INDEX_PATH).len(), 1);
}

#[tokio::test]
async fn test_legacy_template_error_is_wrapped() {
    let gateway = self_managed(8, 8, 0).fail(Method::PUT, LEGACY_TEMPLATE_PATH, 400);
    let manager = IndexManager::new(gateway, IndexMode::Legacy);

    let err = manager.setup().await.unwrap_err();

    assert!(matches!(
        err,
        SetupError::TemplatePhase { template, .. } if template == names::LEGACY_TEMPLATE_NAME
    ));
    let gw = manager.gateway();
    assert_eq!(gw.requests_to(Method::PUT, LEGACY_TEMPLATE_PATH).len(), 1);
    assert_eq!(gw.requests_to(Method::PUT, ILM_PATH).len(), 1);
    assert!(gw.requests_to(Method::HEAD, ALIAS_PATH).is_empty());
}

#[tokio::test]
async fn test_legacy_alias_failure_is_wrapped() {
    let gateway = self_managed(8, 8, 0).fail(Method::PUT, WRITE_INDEX_PATH, 400);
    let manager = IndexManager::new(gateway, IndexMode::Legacy);

    let err = manager.setup().await.unwrap_err();

    assert!(matches!(
        err,
        SetupError::AliasPhase { alias, .. } if alias == names::LEGACY_WRITE_ALIAS
    ));
    assert!(manager.gateway().resource(LEGACY_TEMPLATE_PATH).is_some());
}

#[tokio::test]
async fn test_request_order_is_ilm_then_template() {
    let manager = IndexManager::new(self_managed(8, 8, 0), IndexMode::Legacy);

    manager.setup().await.unwrap();

    let order: Vec<(Method, String)> = manager
        .gateway()
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        order,
        vec![
            (Method::PUT, ILM_PATH.to_string()),
            (Method::HEAD, LEGACY_TEMPLATE_PATH.to_string()),
            (Method::PUT, LEGACY_TEMPLATE_PATH.to_string()),
            (Method::HEAD, ALIAS_PATH.to_string()),
            (Method::PUT, WRITE_INDEX_PATH.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_setup_with_descriptor_skips_probe() {
    // The gateway's own descriptor says serverless; the explicit one wins.
    let manager = IndexManager::new(serverless(), IndexMode::Legacy);

    let report = manager
        .setup_with_descriptor(ClusterDescriptor::self_managed(Version::new(8, 8, 0)))
        .await
        .unwrap();

    assert_eq!(report.mode, IndexMode::Legacy);
    assert_eq!(report.template_name, names::LEGACY_TEMPLATE_NAME);
}

#[test]
fn test_setup_records_phase_outcomes() {
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let report = metrics::with_local_recorder(&recorder, || {
        let manager = IndexManager::new(self_managed(8, 8, 0), IndexMode::Datastream)
            .with_metrics(MetricsCollector::new());
        runtime.block_on(manager.setup())
    })
    .unwrap();

    assert_eq!(report.ilm_policy, PhaseOutcome::Created);
    assert_eq!(report.template, PhaseOutcome::Updated);
    assert_eq!(report.write_alias, PhaseOutcome::NotApplicable);

    let rendered = handle.render();
    let phase_count = |phase: &str, outcome: &str| {
        rendered
            .lines()
            .find(|l| {
                l.starts_with("estack_setup_phases_total{")
                    && l.contains(&format!("phase=\"{phase}\""))
                    && l.contains(&format!("outcome=\"{outcome}\""))
            })
            .and_then(|l| l.rsplit(' ').next())
            .map(str::to_string)
    };

    assert_eq!(phase_count("ilm_policy", "created").as_deref(), Some("1"), "{rendered}");
    assert_eq!(phase_count("index_template", "updated").as_deref(), Some("1"), "{rendered}");
    assert_eq!(
        phase_count("write_alias", "not_applicable").as_deref(),
        Some("1"),
        "{rendered}"
    );
}

#[tokio::test]
async fn test_datastream_template_sent_as_single_object() {
    let manager = IndexManager::new(self_managed(8, 11, 0), IndexMode::Datastream);
    manager.setup().await.unwrap();

    let bodies = manager.gateway().puts_to(DATASTREAM_TEMPLATE_PATH);
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].is_object(), "got: {}", bodies[0]);
    assert_eq!(bodies[0]["index_patterns"], json!(["metrics-telemetry.*-*"]));
}
