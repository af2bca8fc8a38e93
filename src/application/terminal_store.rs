//! State behind the demo trading terminal view, fed by the mock generator.

use crate::domain::market::{Candle, OrderBook, Trade};
use crate::infrastructure::mock::MockMarketData;
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

pub const DEFAULT_CANDLE_COUNT: usize = 100;
pub const MAX_RECENT_TRADES: usize = 50;

/// Serializable view of the terminal at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalSnapshot {
    pub symbol: String,
    pub last_price: f64,
    pub candles: Vec<Candle>,
    pub order_book: OrderBook,
    pub recent_trades: Vec<Trade>,
}

pub struct TerminalStore<R: Rng> {
    generator: MockMarketData<R>,
    symbol: String,
    candle_count: usize,
    candles: Vec<Candle>,
    order_book: OrderBook,
    // Newest first
    trades: VecDeque<Trade>,
    last_price: f64,
}

impl<R: Rng> TerminalStore<R> {
    pub fn new(generator: MockMarketData<R>, symbol: impl Into<String>) -> Self {
        let last_price = generator.seed_price();
        let mut store = Self {
            generator,
            symbol: symbol.into(),
            candle_count: DEFAULT_CANDLE_COUNT,
            candles: Vec::new(),
            order_book: OrderBook::default(),
            trades: VecDeque::with_capacity(MAX_RECENT_TRADES),
            last_price,
        };
        store.refresh();
        store
    }

    pub fn with_candle_count(mut self, count: usize) -> Self {
        self.candle_count = count;
        self.refresh();
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn last_price(&self) -> f64 {
        self.last_price
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn order_book(&self) -> &OrderBook {
        &self.order_book
    }

    pub fn recent_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter()
    }

    /// Switches the terminal to another symbol and regenerates its data.
    pub fn select_symbol(&mut self, symbol: impl Into<String>) {
        self.symbol = symbol.into();
        self.trades.clear();
        self.refresh();
    }

    /// Regenerates candles and the book around the latest close.
    pub fn refresh(&mut self) {
        self.candles = self.generator.candles(self.candle_count);
        if let Some(last) = self.candles.last() {
            self.last_price = last.close;
        }
        self.order_book = self.generator.order_book(self.last_price);
        debug!(
            "Terminal refreshed for {}: {} candles, last {:.4}",
            self.symbol,
            self.candles.len(),
            self.last_price
        );
    }

    /// Prints one trade, moves the last price to it and rebuilds the book.
    pub fn tick(&mut self) -> Trade {
        let trade = self.generator.trade(self.last_price);
        self.last_price = trade.price;
        self.order_book = self.generator.order_book(self.last_price);

        self.trades.push_front(trade.clone());
        self.trades.truncate(MAX_RECENT_TRADES);
        trade
    }

    pub fn snapshot(&self) -> TerminalSnapshot {
        TerminalSnapshot {
            symbol: self.symbol.clone(),
            last_price: self.last_price,
            candles: self.candles.clone(),
            order_book: self.order_book.clone(),
            recent_trades: self.trades.iter().cloned().collect(),
        }
    }
}
