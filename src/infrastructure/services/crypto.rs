use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::reference::{CryptoMarket, CryptoMarketsQuery};
use crate::infrastructure::http_client::ApiClient;
use tracing::info;

#[derive(Clone)]
pub struct CryptoService {
    client: ApiClient,
}

impl CryptoService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Market snapshots proxied from CoinGecko's `/coins/markets`.
    pub async fn markets(&self, query: &CryptoMarketsQuery) -> Result<Vec<CryptoMarket>, ApiError> {
        let params = [
            ("vs_currency", query.vs_currency.clone()),
            ("ids", query.ids.as_ref().map(|ids| ids.join(","))),
            ("per_page", query.per_page.map(|n| n.to_string())),
            ("page", query.page.map(|n| n.to_string())),
        ];

        let markets: Vec<CryptoMarket> = self
            .client
            .get_json(
                ServiceFamily::MarketData,
                "/api/crypto-data/coingecko/markets",
                &params,
            )
            .await?;
        info!("Fetched {} crypto markets", markets.len());
        Ok(markets)
    }
}
