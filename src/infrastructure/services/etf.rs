use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::reference::{EtfCandlesResponse, EtfListResponse};
use crate::infrastructure::http_client::{ApiClient, encode_path_segment};
use chrono::NaiveDate;
use tracing::{debug, info};

/// MOEX ISS candle interval codes accepted by the candles endpoint.
pub mod interval {
    pub const MINUTE: u32 = 1;
    pub const TEN_MINUTES: u32 = 10;
    pub const HOUR: u32 = 60;
    pub const DAY: u32 = 24;
    pub const WEEK: u32 = 7;
    pub const MONTH: u32 = 31;
}

#[derive(Clone)]
pub struct EtfService {
    client: ApiClient,
}

impl EtfService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<EtfListResponse, ApiError> {
        let response: EtfListResponse = self
            .client
            .get_json(ServiceFamily::MarketData, "/api/etf/list", &[])
            .await?;
        info!("Fetched {} ETFs", response.etfs.len());
        Ok(response)
    }

    /// Price history for one fund. Only the bounds that are set are sent.
    pub async fn candles(
        &self,
        ticker: &str,
        interval: u32,
        from: Option<NaiveDate>,
        till: Option<NaiveDate>,
        limit: Option<u32>,
    ) -> Result<EtfCandlesResponse, ApiError> {
        let path = format!("/api/etf/candles/{}", encode_path_segment(ticker));
        let query = [
            ("interval", Some(interval.to_string())),
            ("from", from.map(|d| d.to_string())),
            ("till", till.map(|d| d.to_string())),
            ("limit", limit.map(|l| l.to_string())),
        ];

        let mut response: EtfCandlesResponse = self
            .client
            .get_json(ServiceFamily::MarketData, &path, &query)
            .await?;

        if response.ticker.is_empty() {
            response.ticker = ticker.to_string();
        }

        debug!("Fetched {} candles for {}", response.candles.len(), response.ticker);
        Ok(response)
    }
}
