use async_trait::async_trait;

use crate::client::EsClient;
use crate::endpoints;
use crate::error::Result;
use crate::gateway::{Gateway, GatewayRequest, GatewayResponse};
use crate::setup::ClusterDescriptor;

#[async_trait]
impl Gateway for EsClient {
    async fn cluster_descriptor(&self) -> Result<ClusterDescriptor> {
        EsClient::cluster_descriptor(self).await
    }

    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse> {
        endpoints::send_json(
            &self.http,
            &self.base_url,
            &self.auth,
            &request,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }
}
