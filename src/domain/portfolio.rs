use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A holding in the dashboard portfolio.
///
/// `allocation` and `target_allocation` are percentages of the whole
/// portfolio; a full position set should sum to roughly 100.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub notional: f64,
    pub allocation: f64,
    pub target_allocation: f64,
    /// Chart color tag, e.g. `#2979FF`.
    #[serde(default)]
    pub color: String,
}

impl Position {
    /// Signed distance from target in percentage points.
    pub fn drift(&self) -> f64 {
        self.allocation - self.target_allocation
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioMetricsRequest {
    pub positions: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_free_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioMetricsResponse {
    pub expected_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    #[serde(default)]
    pub sortino_ratio: Option<f64>,
    #[serde(default)]
    pub var_95: Option<f64>,
    #[serde(default)]
    pub cvar_95: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub max_drawdown: Option<f64>,
    #[serde(default)]
    pub diversification_ratio: Option<f64>,
}

// --- Backtest ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceFrequency {
    Never,
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestRequest {
    pub tickers: Vec<String>,
    /// Target weights in the same order as `tickers`, as fractions.
    pub weights: Vec<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    #[serde(default)]
    pub rebalance: RebalanceFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub benchmark: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestMetrics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    #[serde(default)]
    pub final_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestResponse {
    pub metrics: BacktestMetrics,
    #[serde(default)]
    pub equity_curve: Vec<EquityPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self.status.to_lowercase().as_str(), "ok" | "healthy")
    }
}
