//! HTTP client for an Elasticsearch cluster.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `cluster`: Root endpoint and descriptor probing
//! - `gateway`: [`Gateway`](crate::gateway::Gateway) implementation
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Deciding what to create on the cluster (see [`crate::setup`])

pub mod builder;
mod cluster;
mod gateway;

use crate::auth::AuthStrategy;
use crate::metrics::MetricsCollector;

/// Elasticsearch REST client.
///
/// ```rust,ignore
/// use estack_client::{AuthStrategy, EsClient};
/// use secrecy::SecretString;
///
/// let client = EsClient::builder()
///     .base_url("https://localhost:9200".to_string())
///     .auth_strategy(AuthStrategy::ApiKey {
///         key: SecretString::new("base64-key".to_string().into()),
///     })
///     .build()?;
/// ```
#[derive(Debug)]
pub struct EsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth: AuthStrategy,
    pub(crate) max_retries: usize,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl EsClient {
    /// Create a new client builder.
    pub fn builder() -> builder::EsClientBuilder {
        builder::EsClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Which authentication strategy requests use.
    pub fn auth_kind(&self) -> &'static str {
        self.auth.kind()
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}
