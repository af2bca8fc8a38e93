use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::valuation::{ForwardValuationRequest, ForwardValuationResponse};
use crate::infrastructure::http_client::ApiClient;
use tracing::info;

#[derive(Clone)]
pub struct ForwardService {
    client: ApiClient,
}

impl ForwardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn valuate(
        &self,
        request: &ForwardValuationRequest,
    ) -> Result<ForwardValuationResponse, ApiError> {
        info!(
            "Valuating forward: spot={} strike={} days={}",
            request.spot_price, request.strike_price, request.days_to_maturity
        );
        self.client
            .post_json(ServiceFamily::Valuation, "/api/forward/valuate", request)
            .await
    }
}
