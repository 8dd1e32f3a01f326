//! Setup error taxonomy.
//!
//! [`ConfigurationError`] means the operator's choice is wrong and nothing
//! was sent. [`SetupError::Cluster`] carries cluster and transport failures
//! unchanged. Template and alias phase failures keep the underlying
//! [`ClientError`] as their source and name the resource involved.

use thiserror::Error;

use crate::error::ClientError;

/// Invalid or capability-incompatible operator choice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("invalid index mode '{0}': expected 'datastream' or 'legacy'")]
    InvalidIndexMode(String),

    #[error("legacy index mode is not supported on this cluster (no legacy template support)")]
    LegacyModeUnsupported,
}

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Descriptor lookup and ILM phase failures, surfaced unmodified.
    #[error(transparent)]
    Cluster(#[from] ClientError),

    #[error("failed to apply index template '{template}': {source}")]
    TemplatePhase {
        template: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("failed to bootstrap write alias '{alias}': {source}")]
    AliasPhase {
        alias: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("failed to serialize {document}: {source}")]
    Render {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SetupError {
    /// True when the failure happened before anything was sent.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// The cluster-side error behind this failure, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Cluster(e) => Some(e),
            Self::TemplatePhase { source, .. } | Self::AliasPhase { source, .. } => Some(source),
            Self::Configuration(_) | Self::Render { .. } => None,
        }
    }
}
