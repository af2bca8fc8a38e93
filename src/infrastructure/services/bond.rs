use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::valuation::{BondValuationRequest, BondValuationResponse};
use crate::infrastructure::http_client::ApiClient;
use tracing::info;

#[derive(Clone)]
pub struct BondService {
    client: ApiClient,
}

impl BondService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Prices a fixed-coupon bond and returns its cashflow schedule and
    /// rate-shift scenarios.
    pub async fn valuate(
        &self,
        request: &BondValuationRequest,
    ) -> Result<BondValuationResponse, ApiError> {
        info!(
            "Valuating bond: face={} coupon={} maturity={}y",
            request.face_value, request.coupon_rate, request.years_to_maturity
        );
        self.client
            .post_json(ServiceFamily::Valuation, "/api/bond/valuate", request)
            .await
    }
}
