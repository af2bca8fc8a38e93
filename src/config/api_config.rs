//! Backend API configuration parsing from environment variables.
//!
//! Every endpoint family gets its own base URL so that, for example, the
//! backtest engine can run on a different host than the reference-data
//! proxy. Resolution order for a family:
//!
//! 1. `FINDASH_<FAMILY>_API_URL`
//! 2. `FINDASH_API_URL`
//! 3. `http://localhost:8000`

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Groups of backend endpoints that share a base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceFamily {
    /// `/api/backtest/*`
    Backtest,
    /// `/api/bond/*`, `/api/swap/*`, `/api/forward/*`
    Valuation,
    /// `/api/portfolio/*`
    Portfolio,
    /// `/api/etf/*`, `/api/crypto-data/*`, `/api/zcyc*`
    MarketData,
    /// `/api/calendar/*`, `/api/dadata/*`
    Reference,
    /// `/api/database/*`
    Database,
}

impl ServiceFamily {
    pub const ALL: [ServiceFamily; 6] = [
        ServiceFamily::Backtest,
        ServiceFamily::Valuation,
        ServiceFamily::Portfolio,
        ServiceFamily::MarketData,
        ServiceFamily::Reference,
        ServiceFamily::Database,
    ];

    pub fn env_key(self) -> &'static str {
        match self {
            ServiceFamily::Backtest => "FINDASH_BACKTEST_API_URL",
            ServiceFamily::Valuation => "FINDASH_VALUATION_API_URL",
            ServiceFamily::Portfolio => "FINDASH_PORTFOLIO_API_URL",
            ServiceFamily::MarketData => "FINDASH_MARKET_DATA_API_URL",
            ServiceFamily::Reference => "FINDASH_REFERENCE_API_URL",
            ServiceFamily::Database => "FINDASH_DATABASE_API_URL",
        }
    }
}

impl fmt::Display for ServiceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// HTTP client settings shared by all service modules.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_urls: HashMap<ServiceFamily, String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    /// Points every family at the same host.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = normalize_base_url(base_url);
        Self {
            base_urls: ServiceFamily::ALL
                .iter()
                .map(|family| (*family, base.clone()))
                .collect(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self> {
        let fallback = env::var("FINDASH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let mut base_urls = HashMap::new();
        for family in ServiceFamily::ALL {
            let raw = env::var(family.env_key()).unwrap_or_else(|_| fallback.clone());
            let base = normalize_base_url(&raw);
            Url::parse(&base)
                .with_context(|| format!("Invalid base URL for {} API: {}", family, raw))?;
            base_urls.insert(family, base);
        }

        let api_key = env::var("FINDASH_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            base_urls,
            api_key,
            timeout: Duration::from_secs(
                env::var("FINDASH_HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse::<u64>()
                    .context("Failed to parse FINDASH_HTTP_TIMEOUT_SECS")?,
            ),
            connect_timeout: Duration::from_secs(
                env::var("FINDASH_CONNECT_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_CONNECT_TIMEOUT_SECS.to_string())
                    .parse::<u64>()
                    .context("Failed to parse FINDASH_CONNECT_TIMEOUT_SECS")?,
            ),
        })
    }

    pub fn base_url(&self, family: ServiceFamily) -> &str {
        self.base_urls
            .get(&family)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn set_base_url(&mut self, family: ServiceFamily, base_url: &str) {
        self.base_urls.insert(family, normalize_base_url(base_url));
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
