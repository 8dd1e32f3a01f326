//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Merge CLI flags, environment variables and the config file into a [`Config`].
//! - Keep offline commands from requiring connection details.
//!
//! Does NOT handle:
//! - `.env` loading (done first thing in `main()`).
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - Precedence is CLI flags > environment > config file > defaults.
//! - Placeholder contexts cannot be used for cluster connections.

use std::time::Duration;

use anyhow::Context;
use estack_config::{Config, ConfigLoader};

use crate::args::Cli;

pub(crate) enum ConfigCommandContext {
    /// A validated config for commands that talk to a cluster.
    Real(Box<Config>),
    /// Offline commands (`render`) carry no connection details.
    Placeholder,
}

impl ConfigCommandContext {
    /// Build the context the parsed command needs.
    pub(crate) fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        if !cli.command.needs_connection() {
            return Ok(ConfigCommandContext::Placeholder);
        }
        Ok(ConfigCommandContext::Real(Box::new(load_config(cli)?)))
    }

    pub(crate) fn into_real_config(self) -> anyhow::Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Placeholder => {
                anyhow::bail!(
                    "Internal error: attempted to use placeholder config for an operation requiring real connection details"
                )
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();

    // Blank values fall back to ES_CONFIG_PATH handling in from_env().
    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }

    loader = loader
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(ref key) = cli.api_key {
        loader = loader.with_api_key(key.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    loader = loader
        .from_file()
        .context("Failed to load configuration file")?;

    loader.build().context("Failed to build configuration")
}
