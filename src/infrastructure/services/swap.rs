use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::valuation::{SwapValuationRequest, SwapValuationResponse};
use crate::infrastructure::http_client::ApiClient;
use tracing::info;

#[derive(Clone)]
pub struct SwapService {
    client: ApiClient,
}

impl SwapService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn valuate(
        &self,
        request: &SwapValuationRequest,
    ) -> Result<SwapValuationResponse, ApiError> {
        info!(
            "Valuating swap: notional={} fixed={} tenor={}y",
            request.notional, request.fixed_rate, request.tenor_years
        );
        self.client
            .post_json(ServiceFamily::Valuation, "/api/swap/valuate", request)
            .await
    }
}
