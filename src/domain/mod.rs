// Domain-specific error types
pub mod errors;

// Responsive layout breakpoints
pub mod layout;

// Market primitives (candles, order book, trades)
pub mod market;

// Positions, portfolio metrics and backtests
pub mod portfolio;

// Port interfaces
pub mod ports;

// Upstream reference data (ETF, calendar, crypto, company, yield curve)
pub mod reference;

// Background task records
pub mod task;

// Theme modes
pub mod theme;

// Bond, swap and forward valuation DTOs
pub mod valuation;
