//! Reference data passed through verbatim from upstream providers
//! (MOEX, CoinGecko, DaData, the holiday calendar).

use super::market::PricePoint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// --- ETF ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EtfInfo {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub management_company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EtfListResponse {
    pub etfs: Vec<EtfInfo>,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EtfCandlesResponse {
    /// Filled from the request when the backend leaves it out.
    #[serde(default)]
    pub ticker: String,
    pub candles: Vec<PricePoint>,
    #[serde(default)]
    pub provider: Option<String>,
}

// --- Calendar ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub local_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HolidaysResponse {
    pub country: String,
    pub year: i32,
    pub holidays: Vec<Holiday>,
}

impl HolidaysResponse {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }
}

// --- Crypto ---

/// Query for the CoinGecko markets proxy. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CryptoMarketsQuery {
    pub vs_currency: Option<String>,
    pub ids: Option<Vec<String>>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

// --- Company / bank lookup ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyInfo {
    pub inn: String,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub kpp: Option<String>,
    #[serde(default)]
    pub ogrn: Option<String>,
    #[serde(default)]
    pub okved: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub management: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankInfo {
    pub bic: String,
    pub name: String,
    #[serde(default)]
    pub swift: Option<String>,
    #[serde(default)]
    pub correspondent_account: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// --- Zero-coupon yield curve ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldCurvePoint {
    /// Tenor in years.
    pub tenor: f64,
    /// Yield in percent.
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldCurveResponse {
    pub date: NaiveDate,
    pub points: Vec<YieldCurvePoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldCurveInterpolationRequest {
    pub tenors: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldCurveInterpolationResponse {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub points: Vec<YieldCurvePoint>,
}

// --- Binary exports ---

/// A file produced by an export endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}
