//! Testing utilities for client and setup tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use estack_client::testing::ScriptedGateway;
//! use estack_client::{ClusterDescriptor, IndexManager, IndexMode, Version};
//!
//! let gateway = ScriptedGateway::new(ClusterDescriptor::self_managed(Version::new(8, 8, 0)));
//! let manager = IndexManager::new(gateway, IndexMode::Datastream);
//! manager.setup().await?;
//! assert_eq!(manager.gateway().puts_to("/_index_template/metrics-telemetry").len(), 1);
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use crate::error::{ClientError, Result};
use crate::gateway::{Gateway, GatewayRequest, GatewayResponse};
use crate::setup::ClusterDescriptor;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// In-memory stand-in for a cluster.
///
/// `PUT` stores the body under its path, `GET`/`HEAD` answer 200 or 404
/// depending on whether the path was stored, and creating an index with an
/// `aliases` block also registers `/_alias/{name}`. Injected failures take
/// precedence over all of that. Every request sent is recorded;
/// `cluster_descriptor` is not, since it models the connection handshake.
pub struct ScriptedGateway {
    descriptor: ClusterDescriptor,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    resources: BTreeMap<String, Value>,
    failures: Vec<(Method, String, u16)>,
    requests: Vec<GatewayRequest>,
}

impl ScriptedGateway {
    pub fn new(descriptor: ClusterDescriptor) -> Self {
        Self {
            descriptor,
            state: Mutex::new(State::default()),
        }
    }

    /// Pretend `path` already exists with `body`.
    pub fn with_resource(self, path: &str, body: Value) -> Self {
        self.lock().resources.insert(path.to_string(), body);
        self
    }

    /// Answer every `method` request to `path` with `status`.
    pub fn fail(self, method: Method, path: &str, status: u16) -> Self {
        self.lock().failures.push((method, path.to_string(), status));
        self
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.lock().requests.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<GatewayRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    /// Bodies of every `PUT` sent to `path`.
    pub fn puts_to(&self, path: &str) -> Vec<Value> {
        self.requests_to(Method::PUT, path)
            .into_iter()
            .filter_map(|r| r.body)
            .collect()
    }

    /// Stored body for `path`, if it exists.
    pub fn resource(&self, path: &str) -> Option<Value> {
        self.lock().resources.get(path).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn scripted_error(status: u16, path: &str, error_type: &str) -> ClientError {
    ClientError::ApiError {
        status,
        url: path.to_string(),
        message: format!("{error_type}: scripted response for {path}"),
        error_type: Some(error_type.to_string()),
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn cluster_descriptor(&self) -> Result<ClusterDescriptor> {
        Ok(self.descriptor)
    }

    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        if let Some((_, _, status)) = state
            .failures
            .iter()
            .find(|(method, path, _)| *method == request.method && *path == request.path)
        {
            return Err(scripted_error(*status, &request.path, "scripted_failure"));
        }

        match request.method {
            Method::PUT => {
                let body = request.body.unwrap_or(Value::Null);
                if let Some(aliases) = body.get("aliases").and_then(Value::as_object) {
                    for alias in aliases.keys() {
                        state
                            .resources
                            .insert(format!("/_alias/{alias}"), json!({}));
                    }
                }
                state.resources.insert(request.path, body);
                Ok(GatewayResponse {
                    status: 200,
                    body: Some(json!({"acknowledged": true})),
                })
            }
            Method::GET | Method::HEAD => match state.resources.get(&request.path) {
                Some(body) => Ok(GatewayResponse {
                    status: 200,
                    body: (request.method == Method::GET).then(|| body.clone()),
                }),
                None => Err(scripted_error(404, &request.path, "resource_not_found_exception")),
            },
            _ => Err(scripted_error(405, &request.path, "method_not_allowed")),
        }
    }
}
