//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read connection settings from flags or `ES_*` environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not merge configuration sources (see `main`).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "estack")]
#[command(
    about = "Provision the telemetry ILM policy and index template on Elasticsearch",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  estack capabilities\n  estack setup --mode legacy\n  estack render --version 8.8.2\n  estack render --version 8.11.0 --serverless --mode datastream\n"
)]
pub struct Cli {
    /// Base URL of the cluster (e.g., https://localhost:9200)
    #[arg(short, long, global = true, env = "ES_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for basic authentication
    #[arg(short, long, global = true, env = "ES_USERNAME")]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(short, long, global = true, env = "ES_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API key (takes precedence over username/password)
    #[arg(short = 'k', long, global = true, env = "ES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ES_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for transient failures
    #[arg(long, global = true, env = "ES_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "ES_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Path to a JSON configuration file.
    ///
    /// Can also be set via ES_CONFIG_PATH environment variable.
    #[arg(long, global = true, env = "ES_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9464)
    #[arg(long, global = true, env = "ES_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the cluster and create or update the ILM policy and index template
    Setup {
        /// Index mode (datastream or legacy); defaults to ES_INDEX_MODE
        #[arg(short, long, env = "ES_INDEX_MODE")]
        mode: Option<String>,
    },

    /// Show the detected cluster and its capability profile
    Capabilities,

    /// Print the documents setup would send, without contacting a cluster
    Render {
        /// Elasticsearch version to render for (e.g., 8.11.0)
        #[arg(long = "version", visible_alias = "es-version", value_name = "VERSION")]
        es_version: String,

        /// Render for a serverless project
        #[arg(long)]
        serverless: bool,

        /// Index mode (datastream or legacy)
        #[arg(short, long, default_value = "datastream")]
        mode: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Commands {
    /// Whether the command talks to a cluster and so needs connection settings.
    pub fn needs_connection(&self) -> bool {
        !matches!(self, Commands::Render { .. })
    }
}
