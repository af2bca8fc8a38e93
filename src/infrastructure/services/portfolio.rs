use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::portfolio::{PortfolioMetricsRequest, PortfolioMetricsResponse};
use crate::infrastructure::http_client::ApiClient;
use tracing::{info, warn};

#[derive(Clone)]
pub struct PortfolioService {
    client: ApiClient,
}

impl PortfolioService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Risk/return statistics for a position set.
    ///
    /// This is the only call that sends the configured `X-API-Key`.
    pub async fn metrics(
        &self,
        request: &PortfolioMetricsRequest,
    ) -> Result<PortfolioMetricsResponse, ApiError> {
        let total: f64 = request.positions.iter().map(|p| p.allocation).sum();
        info!(
            "Requesting portfolio metrics for {} positions (allocation total {:.2}%)",
            request.positions.len(),
            total
        );
        if self.client.config().api_key.is_none() {
            warn!("No API key configured; portfolio metrics request is unauthenticated");
        }

        self.client
            .post_json_authenticated(ServiceFamily::Portfolio, "/api/portfolio/metrics", request)
            .await
    }
}
