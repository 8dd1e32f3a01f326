//! Command dispatch logic.
//!
//! Routes parsed CLI arguments to the command handlers, extracting the
//! configuration each one needs.

use anyhow::Result;
use estack_client::MetricsCollector;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::config_context::ConfigCommandContext;

pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    metrics: &MetricsCollector,
) -> Result<()> {
    match cli.command {
        Commands::Setup { mode } => {
            let config = config.into_real_config()?;
            commands::setup::run(config, mode, cli.output, metrics).await?;
        }
        Commands::Capabilities => {
            let config = config.into_real_config()?;
            commands::capabilities::run(config, cli.output, metrics).await?;
        }
        Commands::Render {
            es_version,
            serverless,
            mode,
        } => {
            commands::render::run(&es_version, serverless, &mode)?;
        }
    }

    Ok(())
}
