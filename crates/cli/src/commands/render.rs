//! Render command implementation.
//!
//! Works offline: the descriptor comes from the command line instead of
//! `GET /`, and the documents are printed instead of sent.

use anyhow::{Context, Result};
use estack_client::endpoints::paths;
use estack_client::setup::names::METRICS_ILM_POLICY_NAME;
use estack_client::setup::{ClusterDescriptor, Version, mode::validate, policy, resolve, template};
use estack_client::{CapabilityProfile, IndexMode, SetupError};
use serde::Serialize;
use serde_json::Value;

use crate::commands::print_json;

#[derive(Debug, Serialize)]
struct RenderedDocument {
    name: &'static str,
    path: String,
    body: Value,
}

#[derive(Debug, Serialize)]
struct RenderOutput {
    descriptor: ClusterDescriptor,
    profile: CapabilityProfile,
    mode: IndexMode,
    ilm_policy: Option<RenderedDocument>,
    index_template: RenderedDocument,
}

pub fn run(version: &str, serverless: bool, mode: &str) -> Result<()> {
    let version: Version = version
        .parse()
        .with_context(|| format!("Invalid --version '{}'", version))?;
    let mode: IndexMode = mode.parse().map_err(SetupError::from)?;

    print_json(&render(ClusterDescriptor::new(version, serverless), mode)?)
}

fn render(descriptor: ClusterDescriptor, mode: IndexMode) -> Result<RenderOutput> {
    let profile = resolve(&descriptor);
    validate(mode, &profile)?;

    let ilm_applied = policy::applies(mode, &profile);
    let ilm_policy = if ilm_applied {
        Some(RenderedDocument {
            name: METRICS_ILM_POLICY_NAME,
            path: paths::ilm_policy(METRICS_ILM_POLICY_NAME),
            body: serde_json::to_value(policy::render(&profile))
                .context("Failed to serialize ILM policy")?,
        })
    } else {
        None
    };

    let spec = template::render(mode, &profile, ilm_applied);
    let index_template = RenderedDocument {
        name: spec.name(),
        path: spec.path(),
        body: spec.to_json().context("Failed to serialize index template")?,
    };

    Ok(RenderOutput {
        descriptor,
        profile,
        mode,
        ilm_policy,
        index_template,
    })
}
