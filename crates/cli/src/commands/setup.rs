//! Setup command implementation.

use anyhow::Result;
use estack_client::setup::names::LEGACY_WRITE_ALIAS;
use estack_client::{IndexManager, IndexMode, MetricsCollector, PhaseOutcome, SetupReport};
use estack_config::Config;
use tracing::info;

use crate::args::OutputFormat;
use crate::commands::{build_client, print_json};

pub async fn run(
    config: Config,
    mode: Option<String>,
    output: OutputFormat,
    metrics: &MetricsCollector,
) -> Result<()> {
    let mode = mode.unwrap_or_else(|| config.index.mode.clone());

    // Mode text is checked before any connection is made.
    let manager = IndexManager::from_mode_str(build_client(&config, metrics)?, &mode)?
        .with_metrics(metrics.clone());
    info!(
        base_url = %config.connection.base_url,
        mode = %manager.mode(),
        "Running index setup"
    );

    let report = manager.setup().await?;

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", format_report(&report)),
    }
    Ok(())
}

fn format_report(report: &SetupReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Cluster:        {}\n", report.descriptor));
    out.push_str(&format!("Mode:           {}\n", report.mode));
    out.push_str(&format!(
        "ILM policy:     {}\n",
        outcome_label(report.ilm_policy)
    ));
    out.push_str(&format!(
        "Index template: {} ({})\n",
        report.template_name,
        outcome_label(report.template)
    ));
    if report.mode == IndexMode::Legacy {
        out.push_str(&format!(
            "Write alias:    {} ({})\n",
            LEGACY_WRITE_ALIAS,
            outcome_label(report.write_alias)
        ));
    }
    out
}

fn outcome_label(outcome: PhaseOutcome) -> &'static str {
    match outcome {
        PhaseOutcome::NotApplicable => "not used",
        PhaseOutcome::Skipped => "already present",
        PhaseOutcome::Created => "created",
        PhaseOutcome::Updated => "updated",
    }
}
