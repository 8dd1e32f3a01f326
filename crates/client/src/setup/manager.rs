//! Setup orchestration: resolve, validate, ILM phase, template phase and,
//! in legacy mode, write alias bootstrap.
//!
//! # Update policy
//! - Datastream: ILM policy created only if absent; template PUT every run.
//! - Legacy: ILM policy PUT every run; template created only if absent.
//!
//! # Invariants
//! - A rejected mode never reaches the gateway's `send`.
//! - The template phase never runs after an ILM phase failure.
//! - No rollback: a failed template phase leaves the ILM policy in place.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::endpoints::paths;
use crate::error::ClientError;
use crate::gateway::{Gateway, GatewayRequest};
use crate::metrics::MetricsCollector;
use crate::models::{AliasDefinition, CreateIndexBody};
use crate::setup::capabilities::{
    CapabilityProfile, ClusterDescriptor, LifecycleStrategy, resolve,
};
use crate::setup::error::SetupError;
use crate::setup::mode::{IndexMode, validate};
use crate::setup::names::{LEGACY_INITIAL_INDEX, LEGACY_WRITE_ALIAS, METRICS_ILM_POLICY_NAME};
use crate::setup::policy;
use crate::setup::template::{self, TemplateSpec};

/// What a phase did on the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseOutcome {
    /// The phase does not apply to this mode/cluster.
    NotApplicable,
    /// The resource already existed and was left alone.
    Skipped,
    /// The resource was absent and has been created.
    Created,
    /// The resource was written unconditionally.
    Updated,
}

impl PhaseOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PhaseOutcome::NotApplicable => "not_applicable",
            PhaseOutcome::Skipped => "skipped",
            PhaseOutcome::Created => "created",
            PhaseOutcome::Updated => "updated",
        }
    }

    /// True when the resource exists on the cluster after the phase.
    pub const fn is_present(&self) -> bool {
        !matches!(self, PhaseOutcome::NotApplicable)
    }
}

/// Summary of a successful setup run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetupReport {
    pub mode: IndexMode,
    pub descriptor: ClusterDescriptor,
    pub profile: CapabilityProfile,
    pub lifecycle: LifecycleStrategy,
    pub ilm_policy: PhaseOutcome,
    pub template_name: &'static str,
    pub template: PhaseOutcome,
    pub write_alias: PhaseOutcome,
}

/// Provisions the ILM policy and index template for one index mode.
///
/// Callers must not run two `setup` calls against the same cluster at once.
pub struct IndexManager<G> {
    gateway: G,
    mode: IndexMode,
    metrics: Option<MetricsCollector>,
}

impl<G: Gateway> IndexManager<G> {
    pub fn new(gateway: G, mode: IndexMode) -> Self {
        Self {
            gateway,
            mode,
            metrics: None,
        }
    }

    /// Build from configuration text such as `ES_INDEX_MODE`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidIndexMode`](crate::setup::ConfigurationError::InvalidIndexMode)
    /// for anything other than `datastream` or `legacy`.
    pub fn from_mode_str(gateway: G, mode: &str) -> Result<Self, SetupError> {
        Ok(Self::new(gateway, mode.parse()?))
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Detect the cluster through the gateway, then run [`Self::setup_with_descriptor`].
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub async fn setup(&self) -> Result<SetupReport, SetupError> {
        let descriptor = self.gateway.cluster_descriptor().await?;
        self.setup_with_descriptor(descriptor).await
    }

    /// Run every phase against an already known descriptor.
    ///
    /// # Errors
    ///
    /// - [`SetupError::Configuration`] when the mode is not available on the
    ///   cluster; nothing is sent.
    /// - [`SetupError::Cluster`] when the ILM phase fails; the template phase
    ///   is not attempted.
    /// - [`SetupError::TemplatePhase`] / [`SetupError::AliasPhase`] for
    ///   failures after the ILM phase.
    pub async fn setup_with_descriptor(
        &self,
        descriptor: ClusterDescriptor,
    ) -> Result<SetupReport, SetupError> {
        if !descriptor.is_supported() {
            warn!(
                cluster = %descriptor,
                "Cluster is older than the oldest supported line, using least capable profile"
            );
        }

        let profile = resolve(&descriptor);
        validate(self.mode, &profile)?;

        let ilm_policy = self.ilm_phase(&profile).await?;

        let spec = template::render(self.mode, &profile, ilm_policy.is_present());
        let template = self.template_phase(&spec).await?;

        let write_alias = match self.mode {
            IndexMode::Legacy => self.alias_phase().await?,
            IndexMode::Datastream => {
                self.finish_phase("write_alias", PhaseOutcome::NotApplicable)
            }
        };

        Ok(SetupReport {
            mode: self.mode,
            descriptor,
            profile,
            lifecycle: profile.lifecycle_strategy(),
            ilm_policy,
            template_name: spec.name(),
            template,
            write_alias,
        })
    }

    async fn ilm_phase(&self, profile: &CapabilityProfile) -> Result<PhaseOutcome, SetupError> {
        if !policy::applies(self.mode, profile) {
            info!(
                lifecycle = ?profile.lifecycle_strategy(),
                "ILM policy not used on this cluster"
            );
            return Ok(self.finish_phase("ilm_policy", PhaseOutcome::NotApplicable));
        }

        let path = paths::ilm_policy(METRICS_ILM_POLICY_NAME);

        let outcome = match self.mode {
            IndexMode::Datastream => {
                if self.gateway.exists(GatewayRequest::get(path.clone())).await? {
                    PhaseOutcome::Skipped
                } else {
                    let body = to_json("ILM policy", &policy::render(profile))?;
                    self.gateway.send(GatewayRequest::put(path, body)).await?;
                    PhaseOutcome::Created
                }
            }
            IndexMode::Legacy => {
                let body = to_json("ILM policy", &policy::render(profile))?;
                self.gateway.send(GatewayRequest::put(path, body)).await?;
                PhaseOutcome::Updated
            }
        };

        info!(policy = METRICS_ILM_POLICY_NAME, outcome = outcome.as_str(), "ILM phase done");
        Ok(self.finish_phase("ilm_policy", outcome))
    }

    async fn template_phase(&self, spec: &TemplateSpec) -> Result<PhaseOutcome, SetupError> {
        let name = spec.name();
        let path = spec.path();
        let wrap = |source: ClientError| SetupError::TemplatePhase {
            template: name,
            source,
        };

        let outcome = match spec {
            TemplateSpec::Modern(_) => {
                // Sent as a bare object; Elasticsearch rejects an array-wrapped template.
                let body = template_json(spec)?;
                self.gateway
                    .send(GatewayRequest::put(path, body))
                    .await
                    .map_err(wrap)?;
                PhaseOutcome::Updated
            }
            TemplateSpec::Legacy(_) => {
                let exists = self
                    .gateway
                    .exists(GatewayRequest::head(path.clone()))
                    .await
                    .map_err(wrap)?;
                if exists {
                    PhaseOutcome::Skipped
                } else {
                    let body = template_json(spec)?;
                    self.gateway
                        .send(GatewayRequest::put(path, body))
                        .await
                        .map_err(wrap)?;
                    PhaseOutcome::Created
                }
            }
        };

        info!(template = name, outcome = outcome.as_str(), "Template phase done");
        Ok(self.finish_phase("index_template", outcome))
    }

    /// Legacy rollover needs an initial index carrying the write alias.
    async fn alias_phase(&self) -> Result<PhaseOutcome, SetupError> {
        let wrap = |source: ClientError| SetupError::AliasPhase {
            alias: LEGACY_WRITE_ALIAS,
            source,
        };

        let exists = self
            .gateway
            .exists(GatewayRequest::head(paths::alias(LEGACY_WRITE_ALIAS)))
            .await
            .map_err(wrap)?;

        let outcome = if exists {
            PhaseOutcome::Skipped
        } else {
            let body = CreateIndexBody {
                aliases: BTreeMap::from([(
                    LEGACY_WRITE_ALIAS.to_string(),
                    AliasDefinition {
                        is_write_index: true,
                    },
                )]),
            };
            let body = to_json("write index", &body)?;
            self.gateway
                .send(GatewayRequest::put(paths::index(LEGACY_INITIAL_INDEX), body))
                .await
                .map_err(wrap)?;
            PhaseOutcome::Created
        };

        info!(alias = LEGACY_WRITE_ALIAS, outcome = outcome.as_str(), "Write alias phase done");
        Ok(self.finish_phase("write_alias", outcome))
    }

    fn finish_phase(&self, phase: &'static str, outcome: PhaseOutcome) -> PhaseOutcome {
        if let Some(m) = &self.metrics {
            m.record_setup_phase(phase, outcome.as_str());
        }
        outcome
    }
}

fn to_json<T: Serialize>(document: &'static str, value: &T) -> Result<serde_json::Value, SetupError> {
    serde_json::to_value(value).map_err(|source| SetupError::Render { document, source })
}

fn template_json(spec: &TemplateSpec) -> Result<serde_json::Value, SetupError> {
    spec.to_json().map_err(|source| SetupError::Render {
        document: "index template",
        source,
    })
}
