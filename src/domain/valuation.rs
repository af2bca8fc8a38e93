//! Request/response shapes for the instrument valuation endpoints.
//!
//! Rates are decimal fractions (0.12 = 12%), tenors are in years unless the
//! field name says otherwise. Cashflow and scenario tables keep the order the
//! backend sends them in: chronological for cashflows, scenario index for
//! scenarios.

use serde::{Deserialize, Serialize};

// --- Bond ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BondValuationRequest {
    pub face_value: f64,
    pub coupon_rate: f64,
    pub years_to_maturity: f64,
    pub market_rate: f64,
    /// Coupon payments per year.
    pub frequency: u32,
    /// Parallel shifts in basis points for the scenario table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_shifts_bp: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BondCashflow {
    pub period: u32,
    /// Time from valuation date in years.
    pub time: f64,
    pub amount: f64,
    pub discount_factor: f64,
    pub present_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateScenario {
    pub shift_bp: f64,
    pub price: f64,
    pub price_change_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BondValuationResponse {
    pub price: f64,
    #[serde(default)]
    pub accrued_interest: Option<f64>,
    pub ytm: f64,
    pub macaulay_duration: f64,
    pub modified_duration: f64,
    pub convexity: f64,
    #[serde(default)]
    pub cashflows: Vec<BondCashflow>,
    #[serde(default)]
    pub scenarios: Vec<RateScenario>,
}

// --- Interest rate swap ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapValuationRequest {
    pub notional: f64,
    pub fixed_rate: f64,
    pub floating_rate: f64,
    pub tenor_years: f64,
    /// Payments per year on both legs.
    pub frequency: u32,
    pub discount_rate: f64,
    #[serde(default)]
    pub spread_bp: f64,
    /// `true` when we pay fixed and receive floating.
    #[serde(default = "default_pay_fixed")]
    pub pay_fixed: bool,
}

fn default_pay_fixed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapCashflow {
    pub period: u32,
    pub time: f64,
    pub fixed_amount: f64,
    pub floating_amount: f64,
    pub net_amount: f64,
    pub discount_factor: f64,
    pub present_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapScenario {
    pub shift_bp: f64,
    pub npv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapValuationResponse {
    pub npv: f64,
    pub fixed_leg_pv: f64,
    pub floating_leg_pv: f64,
    pub par_rate: f64,
    pub dv01: f64,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub cashflows: Vec<SwapCashflow>,
    #[serde(default)]
    pub scenarios: Vec<SwapScenario>,
}

// --- FX / commodity forward ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForwardValuationRequest {
    pub spot_price: f64,
    /// Contracted delivery price.
    pub strike_price: f64,
    pub notional: f64,
    pub domestic_rate: f64,
    pub foreign_rate: f64,
    pub days_to_maturity: u32,
    #[serde(default = "default_day_count")]
    pub day_count_basis: u32,
}

fn default_day_count() -> u32 {
    365
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForwardScenario {
    pub spot_change_pct: f64,
    pub spot_price: f64,
    pub forward_price: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForwardValuationResponse {
    pub forward_price: f64,
    pub fair_value: f64,
    #[serde(default)]
    pub forward_points: Option<f64>,
    #[serde(default)]
    pub discount_factor: Option<f64>,
    #[serde(default)]
    pub scenarios: Vec<ForwardScenario>,
}
