//! The narrow seam between the setup flow and a cluster.
//!
//! [`IndexManager`](crate::setup::IndexManager) only needs two things from a
//! cluster: its descriptor and a way to send a JSON request. [`EsClient`]
//! implements this over HTTP; [`testing::ScriptedGateway`] replays canned
//! responses in tests.
//!
//! [`EsClient`]: crate::EsClient
//! [`testing::ScriptedGateway`]: crate::testing::ScriptedGateway

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::setup::ClusterDescriptor;

/// A single management request, relative to the cluster base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl GatewayRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self {
            method: Method::HEAD,
            path: path.into(),
            body: None,
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A successful (2xx) response. Non-success statuses surface as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    /// Parsed JSON body; `None` for HEAD requests and empty bodies.
    pub body: Option<Value>,
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Version and flavor of the connected cluster.
    async fn cluster_descriptor(&self) -> Result<ClusterDescriptor>;

    /// Send one request.
    ///
    /// # Errors
    ///
    /// Any non-2xx status is returned as [`ClientError::ApiError`](crate::ClientError::ApiError).
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse>;

    /// Send a probe request and map 404 to `false`.
    async fn exists(&self, request: GatewayRequest) -> Result<bool> {
        match self.send(request).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
