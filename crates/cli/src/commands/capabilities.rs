//! Capabilities command implementation.

use anyhow::Result;
use estack_client::setup::{
    CapabilityProfile, ClusterDescriptor, LifecycleStrategy, mode::validate, resolve,
};
use estack_client::{IndexMode, MetricsCollector};
use estack_config::Config;
use serde::Serialize;
use tracing::{info, warn};

use crate::args::OutputFormat;
use crate::commands::{build_client, print_json};

#[derive(Debug, Serialize)]
struct CapabilitiesOutput {
    descriptor: ClusterDescriptor,
    supported: bool,
    profile: CapabilityProfile,
    lifecycle: LifecycleStrategy,
    modes: Vec<IndexMode>,
}

impl CapabilitiesOutput {
    fn new(descriptor: ClusterDescriptor) -> Self {
        let profile = resolve(&descriptor);
        let modes = [IndexMode::Datastream, IndexMode::Legacy]
            .into_iter()
            .filter(|mode| validate(*mode, &profile).is_ok())
            .collect();

        Self {
            descriptor,
            supported: descriptor.is_supported(),
            profile,
            lifecycle: profile.lifecycle_strategy(),
            modes,
        }
    }

    fn to_text(&self) -> String {
        let p = &self.profile;
        let modes: Vec<&str> = self.modes.iter().map(IndexMode::as_str).collect();
        let mut out = String::new();
        out.push_str(&format!("Cluster:   {}\n", self.descriptor));
        out.push_str(&format!("Supported: {}\n", yes_no(self.supported)));
        out.push_str(&format!("Lifecycle: {:?}\n", self.lifecycle));
        out.push_str(&format!("Modes:     {}\n", modes.join(", ")));
        out.push_str(&format!("  ilm:                         {}\n", yes_no(p.supports_ilm)));
        out.push_str(&format!(
            "  datastream_lifecycle:        {}\n",
            yes_no(p.supports_datastream_lifecycle)
        ));
        out.push_str(&format!(
            "  time_series_datastream:      {}\n",
            yes_no(p.supports_time_series_datastream)
        ));
        out.push_str(&format!(
            "  component_templates:         {}\n",
            yes_no(p.supports_component_template_composition)
        ));
        out.push_str(&format!(
            "  max_primary_shard_size:      {}\n",
            yes_no(p.supports_max_primary_shard_size_rollover)
        ));
        out.push_str(&format!(
            "  legacy_templates:            {}\n",
            yes_no(p.supports_legacy_templates)
        ));
        out
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

pub async fn run(config: Config, output: OutputFormat, metrics: &MetricsCollector) -> Result<()> {
    info!(base_url = %config.connection.base_url, "Detecting cluster capabilities");

    let client = build_client(&config, metrics)?;
    let descriptor = client.cluster_descriptor().await?;
    let report = CapabilitiesOutput::new(descriptor);

    if !report.supported {
        warn!(
            cluster = %descriptor,
            "Cluster is older than the oldest supported line"
        );
    }

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", report.to_text()),
    }
    Ok(())
}
