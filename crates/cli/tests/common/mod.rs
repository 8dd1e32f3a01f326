//! Shared test utilities for estack integration tests.
//!
//! Invariants / Assumptions:
//! - Every command built here is hermetic: no `.env` loading, no `ES_*`
//!   variables inherited from the host.

use assert_cmd::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a hermetic `estack` command for integration testing.
pub fn estack_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("estack");

    cmd.env("DOTENV_DISABLED", "1");

    for var in [
        "ES_BASE_URL",
        "ES_USERNAME",
        "ES_PASSWORD",
        "ES_API_KEY",
        "ES_SKIP_VERIFY",
        "ES_TIMEOUT",
        "ES_MAX_RETRIES",
        "ES_INDEX_MODE",
        "ES_CONFIG_PATH",
        "ES_METRICS_BIND",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

/// Hermetic command pointed at `base_url` with retries disabled.
#[allow(dead_code)]
pub fn estack_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = estack_cmd();
    cmd.env("ES_BASE_URL", base_url).env("ES_MAX_RETRIES", "0");
    cmd
}

/// Start a mock cluster whose `GET /` reports `number` and `build_flavor`.
#[allow(dead_code)]
pub async fn mock_cluster(number: &str, build_flavor: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "node-1",
            "cluster_name": "docker-cluster",
            "version": {
                "number": number,
                "build_flavor": build_flavor
            },
            "tagline": "You Know, for Search"
        })))
        .mount(&server)
        .await;
    server
}

/// Number of requests the server saw for `verb` on `request_path`.
#[allow(dead_code)]
pub async fn count_of(server: &MockServer, verb: &str, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == request_path)
        .count()
}
