use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::portfolio::{BacktestRequest, BacktestResponse, HealthStatus};
use crate::infrastructure::http_client::ApiClient;
use tracing::info;

#[derive(Clone)]
pub struct BacktestService {
    client: ApiClient,
}

impl BacktestService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn run(&self, request: &BacktestRequest) -> Result<BacktestResponse, ApiError> {
        info!(
            "Running backtest for {:?} from {} to {}",
            request.tickers, request.start_date, request.end_date
        );
        self.client
            .post_json(ServiceFamily::Backtest, "/api/backtest/run", request)
            .await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.client
            .get_json(ServiceFamily::Backtest, "/api/backtest/health", &[])
            .await
    }
}
