//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Mock clusters answer `GET /` with a root fixture

use std::time::Duration;

#[allow(unused_imports)]
pub use estack_client::testing::{ScriptedGateway, load_fixture};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use estack_client::EsClient;
use wiremock::matchers::{method, path};

/// Start a mock cluster whose root endpoint returns `fixtures/cluster/{root_fixture}`.
#[allow(dead_code)]
pub async fn mock_cluster(root_fixture: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture(&format!("cluster/{root_fixture}"))),
        )
        .mount(&server)
        .await;
    server
}

/// Client pointed at `server` with retries disabled.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> EsClient {
    EsClient::builder()
        .base_url(server.uri())
        .max_retries(0)
        .build()
        .expect("client builds")
}

/// Bodies of every request matching `verb` and `request_path`.
#[allow(dead_code)]
pub async fn bodies_of(
    server: &MockServer,
    verb: &str,
    request_path: &str,
) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == request_path)
        .map(|r| serde_json::from_slice(&r.body).unwrap_or(serde_json::Value::Null))
        .collect()
}

/// Number of requests matching `verb` and `request_path`.
#[allow(dead_code)]
pub async fn count_of(server: &MockServer, verb: &str, request_path: &str) -> usize {
    bodies_of(server, verb, request_path).await.len()
}

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Assert that a task has not completed after yielding to the scheduler.
#[allow(dead_code)]
pub async fn assert_pending<T>(handle: &tokio::task::JoinHandle<T>, context: &str) {
    tokio::task::yield_now().await;
    assert!(!handle.is_finished(), "Expected pending task: {}", context);
}
