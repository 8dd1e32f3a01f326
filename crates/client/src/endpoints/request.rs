//! Retry helper for HTTP requests with exponential backoff.
//!
//! Requests that fail with a transient status (429, 502, 503, 504) are
//! retried with exponential backoff. Any other non-success status is turned
//! into [`ClientError::ApiError`] using the Elasticsearch error envelope when
//! one is present.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ErrorBody;

/// Sends an HTTP request, retrying transient failures.
///
/// * Backoff is `2^attempt` seconds (1s, 2s, 4s, ...).
/// * `max_retries` counts retries, not attempts. Zero means a single attempt.
/// * `endpoint` and `method` label metrics and log lines; pass the path
///   template rather than the full URL.
///
/// # Errors
///
/// Returns [`ClientError::MaxRetriesExceeded`] wrapping the last failure when
/// every attempt hit a retryable status. Transport failures and
/// non-retryable statuses are returned immediately.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let mut last_error = None;

    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                return send_once(builder, endpoint, method, metrics).await;
            }
        };

        if attempt > 0
            && let Some(m) = metrics
        {
            m.record_retry(endpoint, method, attempt);
        }

        match send_once(attempt_builder, endpoint, method, metrics).await {
            Ok(response) => {
                if attempt > 0 {
                    debug!(attempt = attempt + 1, "Request succeeded after retry");
                }
                return Ok(response);
            }
            Err(err) if err.is_retryable() && attempt < max_retries => {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    endpoint,
                    method,
                    attempt = attempt + 1,
                    max_attempts = max_retries + 1,
                    backoff_secs,
                    error = %err,
                    "Transient failure, retrying with exponential backoff"
                );
                last_error = Some(err);
                tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
            }
            Err(err) if err.is_retryable() && max_retries > 0 => {
                debug!(attempts = attempt + 1, "Max retries exhausted");
                return Err(ClientError::MaxRetriesExceeded(
                    max_retries + 1,
                    Box::new(err),
                ));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ClientError::MaxRetriesExceeded(
        max_retries + 1,
        Box::new(last_error.unwrap_or_else(|| {
            ClientError::InvalidResponse("no attempt was made".to_string())
        })),
    ))
}

/// One attempt: send, time it, and map non-success statuses to errors.
async fn send_once(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }
    let started = Instant::now();

    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
            let err = ClientError::from_transport(e);
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method, started.elapsed(), None);
                m.record_client_error(endpoint, method, &err);
            }
            return Err(err);
        }
    };

    let status = response.status().as_u16();
    if let Some(m) = metrics {
        m.record_request_duration(endpoint, method, started.elapsed(), Some(status));
    }

    if response.status().is_success() {
        return Ok(response);
    }

    let err = api_error_from_response(response).await;
    if let Some(m) = metrics {
        m.record_client_error(endpoint, method, &err);
    }
    Err(err)
}

async fn api_error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();

    let (message, error_type) = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => (
            parsed.error.reason(),
            parsed.error.error_type().map(str::to_string),
        ),
        Err(_) if body.trim().is_empty() => (
            status
                .canonical_reason()
                .unwrap_or("empty response body")
                .to_string(),
            None,
        ),
        Err(_) => (body, None),
    };

    ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
        error_type,
    }
}
