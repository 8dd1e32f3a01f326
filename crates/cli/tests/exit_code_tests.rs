//! Integration tests for structured exit codes.

mod common;

use common::{estack_cmd_with_base_url, mock_cluster};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_auth_failure_returns_exit_code_2() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"type": "security_exception", "reason": "unable to authenticate user"},
            "status": 401
        })))
        .mount(&server)
        .await;

    estack_cmd_with_base_url(&server.uri())
        .arg("capabilities")
        .assert()
        .code(2);
}

#[test]
fn test_connection_refused_returns_exit_code_3() {
    estack_cmd_with_base_url("http://127.0.0.1:9")
        .arg("capabilities")
        .assert()
        .code(3);
}

#[tokio::test]
async fn test_template_permission_denied_returns_exit_code_6() {
    let server = mock_cluster("8.8.2", "default").await;
    Mock::given(method("GET"))
        .and(path("/_ilm/policy/metrics-telemetry"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metrics-telemetry": {"policy": {}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/_index_template/metrics-telemetry"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {
                "type": "security_exception",
                "reason": "action [indices:admin/index_template/put] is unauthorized"
            },
            "status": 403
        })))
        .mount(&server)
        .await;

    estack_cmd_with_base_url(&server.uri())
        .arg("setup")
        .assert()
        .code(6);
}

#[tokio::test]
async fn test_rejected_policy_returns_exit_code_9() {
    let server = mock_cluster("7.11.2", "default").await;
    Mock::given(method("PUT"))
        .and(path("/_ilm/policy/metrics-telemetry"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"type": "x_content_parse_exception", "reason": "bad policy"},
            "status": 400
        })))
        .mount(&server)
        .await;

    estack_cmd_with_base_url(&server.uri())
        .args(["setup", "--mode", "legacy"])
        .assert()
        .code(9);
}

#[test]
fn test_invalid_timeout_returns_exit_code_5() {
    estack_cmd_with_base_url("http://localhost:9200")
        .env("ES_TIMEOUT", "0")
        .arg("capabilities")
        .assert()
        .code(5);
}

#[test]
fn test_invalid_metrics_bind_returns_exit_code_5() {
    common::estack_cmd()
        .args(["--metrics-bind", "not-an-address", "render", "--version", "8.8.2"])
        .assert()
        .code(5)
        .stderr(predicates::str::contains("Invalid metrics bind address"));
}
