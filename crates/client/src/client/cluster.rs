use tracing::debug;

use crate::client::EsClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::ClusterInfo;
use crate::setup::{ClusterDescriptor, Version};

impl EsClient {
    /// Fetch the root endpoint (`GET /`).
    pub async fn cluster_info(&self) -> Result<ClusterInfo> {
        endpoints::get_cluster_info(
            &self.http,
            &self.base_url,
            &self.auth,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Probe the cluster and describe its version and flavor.
    ///
    /// Serverless projects report a placeholder version number, so the build
    /// flavor decides and the number is kept only for display.
    pub async fn cluster_descriptor(&self) -> Result<ClusterDescriptor> {
        let info = self.cluster_info().await?;
        descriptor_from_info(&info)
    }
}

pub(crate) fn descriptor_from_info(info: &ClusterInfo) -> Result<ClusterDescriptor> {
    let version: Version = info.version.number.parse().map_err(|e| {
        ClientError::InvalidResponse(format!(
            "cluster reported unparseable version '{}': {}",
            info.version.number, e
        ))
    })?;
    let is_serverless = info.version.is_serverless();
    debug!(%version, is_serverless, "Resolved cluster descriptor");
    Ok(ClusterDescriptor::new(version, is_serverless))
}
