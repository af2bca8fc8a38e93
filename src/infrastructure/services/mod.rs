//! One service per backend API family.

pub mod backtest;
pub mod bond;
pub mod calendar;
pub mod company;
pub mod crypto;
pub mod database;
pub mod etf;
pub mod forward;
pub mod portfolio;
pub mod swap;
pub mod yield_curve;

pub use backtest::BacktestService;
pub use bond::BondService;
pub use calendar::CalendarService;
pub use company::CompanyService;
pub use crypto::CryptoService;
pub use database::DatabaseService;
pub use etf::EtfService;
pub use forward::ForwardService;
pub use portfolio::PortfolioService;
pub use swap::SwapService;
pub use yield_curve::YieldCurveService;

use crate::infrastructure::http_client::ApiClient;

/// Every service, sharing one connection pool.
#[derive(Clone)]
pub struct Services {
    pub backtest: BacktestService,
    pub bond: BondService,
    pub swap: SwapService,
    pub forward: ForwardService,
    pub portfolio: PortfolioService,
    pub etf: EtfService,
    pub crypto: CryptoService,
    pub calendar: CalendarService,
    pub company: CompanyService,
    pub yield_curve: YieldCurveService,
    pub database: DatabaseService,
}

impl Services {
    pub fn new(client: ApiClient) -> Self {
        Self {
            backtest: BacktestService::new(client.clone()),
            bond: BondService::new(client.clone()),
            swap: SwapService::new(client.clone()),
            forward: ForwardService::new(client.clone()),
            portfolio: PortfolioService::new(client.clone()),
            etf: EtfService::new(client.clone()),
            crypto: CryptoService::new(client.clone()),
            calendar: CalendarService::new(client.clone()),
            company: CompanyService::new(client.clone()),
            yield_curve: YieldCurveService::new(client.clone()),
            database: DatabaseService::new(client),
        }
    }
}
