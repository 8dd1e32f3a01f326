//! Generic JSON request used by the [`Gateway`](crate::gateway::Gateway) implementation.

use reqwest::{Client, Method};

use crate::auth::AuthStrategy;
use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::gateway::{GatewayRequest, GatewayResponse};
use crate::metrics::MetricsCollector;

/// Send a management request and parse its JSON body, if any.
pub async fn send_json(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    request: &GatewayRequest,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<GatewayResponse> {
    let url = format!("{}{}", base_url, request.path);

    let mut builder = client.request(request.method.clone(), &url);
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }
    let builder = auth.apply(builder);

    let response = send_request_with_retry(
        builder,
        max_retries,
        &request.path,
        request.method.as_str(),
        metrics,
    )
    .await?;

    let status = response.status().as_u16();
    if request.method == Method::HEAD {
        return Ok(GatewayResponse { status, body: None });
    }

    let text = response.text().await?;
    let body = if text.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "{} {} returned non-JSON body: {}",
                request.method, request.path, e
            ))
        })?)
    };

    Ok(GatewayResponse { status, body })
}
