//! estack - provision the telemetry ILM policy and index template.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Run setup and inspection commands through the shared client library.
//!
//! Does NOT handle:
//! - Capability resolution or document rendering (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; command output goes to stdout.

mod args;
mod commands;
mod config_context;
mod dispatch;
mod error;

use args::{Cli, LogFormat};
use clap::Parser;
use config_context::ConfigCommandContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use estack_client::{MetricsCollector, MetricsExporter};
use estack_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ConfigurationError.as_i32());
    }

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    // Requests and setup phases are only recorded when an exporter is serving them
    let (_metrics_exporter, metrics) = match cli.metrics_bind.as_deref() {
        Some(bind_addr) => match MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::debug!(addr = %exporter.bind_addr(), "Recording request and setup metrics");
                (Some(exporter), MetricsCollector::new())
            }
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::ConfigurationError.as_i32());
            }
        },
        None => (None, MetricsCollector::disabled()),
    };

    let exit_code = match run(cli, &metrics).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli, metrics: &MetricsCollector) -> anyhow::Result<()> {
    let config = ConfigCommandContext::from_cli(&cli)?;
    run_command(cli, config, metrics).await
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
