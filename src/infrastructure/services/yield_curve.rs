use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::reference::{
    YieldCurveInterpolationRequest, YieldCurveInterpolationResponse, YieldCurveResponse,
};
use crate::infrastructure::http_client::ApiClient;
use chrono::NaiveDate;
use tracing::info;

/// Zero-coupon yield curve (ZCYC) published by the exchange.
#[derive(Clone)]
pub struct YieldCurveService {
    client: ApiClient,
}

impl YieldCurveService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Curve for `date`, or the latest published one when `None`.
    pub async fn curve(&self, date: Option<NaiveDate>) -> Result<YieldCurveResponse, ApiError> {
        let query = [("date", date.map(|d| d.to_string()))];
        let curve: YieldCurveResponse = self
            .client
            .get_json(ServiceFamily::MarketData, "/api/zcyc", &query)
            .await?;
        info!("Fetched yield curve for {} ({} points)", curve.date, curve.points.len());
        Ok(curve)
    }

    pub async fn interpolate(
        &self,
        request: &YieldCurveInterpolationRequest,
    ) -> Result<YieldCurveInterpolationResponse, ApiError> {
        self.client
            .post_json(ServiceFamily::MarketData, "/api/zcyc/interpolate", request)
            .await
    }
}
