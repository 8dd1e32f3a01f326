//! CLI command implementations.

pub mod capabilities;
pub mod render;
pub mod setup;

use anyhow::{Context, Result};
use estack_client::{EsClient, MetricsCollector};
use estack_config::Config;
use serde::Serialize;

/// Build a client from the merged configuration.
pub fn build_client(config: &Config, metrics: &MetricsCollector) -> Result<EsClient> {
    EsClient::builder()
        .from_config(config)
        .metrics(metrics.clone())
        .build()
        .context("Failed to build Elasticsearch client")
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
