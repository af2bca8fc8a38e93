//! Random market data for the demo trading terminal.
//!
//! Values are random but the shape is fixed: candles one minute apart,
//! fifteen levels per book side. Nothing here is persisted or checked
//! against a real feed.

use crate::domain::market::{Candle, OrderBook, OrderBookItem, Trade, TradeSide};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

pub const DEFAULT_SEED_PRICE: f64 = 100.0;
pub const ORDER_BOOK_DEPTH: usize = 15;
pub const CANDLE_INTERVAL_MS: i64 = 60_000;

/// Largest open→close move per candle, as a fraction of the open.
const MAX_BODY_MOVE: f64 = 0.01;
/// Largest wick beyond the candle body, as a fraction of the body top/bottom.
const MAX_WICK: f64 = 0.005;
/// Distance between adjacent book levels, as a fraction of the reference.
const LEVEL_STEP: f64 = 0.0005;
/// Largest random distance of a trade print from the reference.
const MAX_TRADE_SLIP: f64 = 0.001;

pub struct MockMarketData<R: Rng = StdRng> {
    rng: R,
    seed_price: f64,
}

impl MockMarketData<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible stream, for tests and screenshots.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MockMarketData<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            seed_price: DEFAULT_SEED_PRICE,
        }
    }

    pub fn with_seed_price(mut self, price: f64) -> Self {
        self.seed_price = price;
        self
    }

    pub fn seed_price(&self) -> f64 {
        self.seed_price
    }

    /// `count` candles ending at the current minute, oldest first.
    pub fn candles(&mut self, count: usize) -> Vec<Candle> {
        let now = Utc::now().timestamp_millis();
        let end = now - now.rem_euclid(CANDLE_INTERVAL_MS);
        let start = end - CANDLE_INTERVAL_MS * count.saturating_sub(1) as i64;
        self.candles_from(start, count)
    }

    /// `count` candles starting at `start_ms`, one minute apart.
    pub fn candles_from(&mut self, start_ms: i64, count: usize) -> Vec<Candle> {
        let mut candles = Vec::with_capacity(count);
        let mut price = self.seed_price;

        for i in 0..count {
            let open = price;
            let close = open * (1.0 + self.rng.random_range(-MAX_BODY_MOVE..=MAX_BODY_MOVE));
            let high = open.max(close) * (1.0 + self.rng.random_range(0.0..=MAX_WICK));
            let low = open.min(close) * (1.0 - self.rng.random_range(0.0..=MAX_WICK));
            let volume = self.rng.random_range(100.0..10_000.0);

            candles.push(Candle {
                time: start_ms + CANDLE_INTERVAL_MS * i as i64,
                open,
                high,
                low,
                close,
                volume,
            });
            price = close;
        }

        candles
    }

    /// Bids strictly below and asks strictly above `reference`, best first.
    pub fn order_book(&mut self, reference: f64) -> OrderBook {
        let mut bids = Vec::with_capacity(ORDER_BOOK_DEPTH);
        let mut asks = Vec::with_capacity(ORDER_BOOK_DEPTH);

        for level in 1..=ORDER_BOOK_DEPTH {
            let offset = reference * LEVEL_STEP * level as f64;
            bids.push(OrderBookItem {
                price: reference - offset,
                amount: self.random_amount(),
                total: None,
            });
            asks.push(OrderBookItem {
                price: reference + offset,
                amount: self.random_amount(),
                total: None,
            });
        }

        OrderBook { bids, asks }
    }

    /// One random print near `reference`, stamped now.
    pub fn trade(&mut self, reference: f64) -> Trade {
        let side = if self.rng.random_bool(0.5) {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        };
        let price = reference * (1.0 + self.rng.random_range(-MAX_TRADE_SLIP..=MAX_TRADE_SLIP));

        Trade {
            id: Uuid::new_v4().to_string(),
            price,
            amount: self.random_amount(),
            time: Utc::now().timestamp_millis(),
            side,
        }
    }

    fn random_amount(&mut self) -> f64 {
        let raw: f64 = self.rng.random_range(0.01..5.0);
        (raw * 10_000.0).round() / 10_000.0
    }
}
