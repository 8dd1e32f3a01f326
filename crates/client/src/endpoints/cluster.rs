//! Cluster root endpoint.

use reqwest::Client;

use crate::auth::AuthStrategy;
use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ClusterInfo;

/// Get name and version information (`GET /`).
pub async fn get_cluster_info(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<ClusterInfo> {
    let url = format!("{}/", base_url);

    let builder = auth.apply(client.get(&url));
    let response = send_request_with_retry(builder, max_retries, "/", "GET", metrics).await?;

    let resp: serde_json::Value = response.json().await?;
    let info: ClusterInfo = serde_json::from_value(resp).map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse cluster info: {}", e))
    })?;
    Ok(info)
}
