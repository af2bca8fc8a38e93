use crate::domain::portfolio::{PortfolioMetricsRequest, Position};
use std::sync::Mutex;
use tracing::warn;

/// Allocations further than this from 100% get a warning.
const ALLOCATION_TOLERANCE_PCT: f64 = 0.5;

/// Positions shown on the portfolio page.
///
/// Allocations are not validated on the way in; the store only reports how
/// far the set is from summing to 100 and from each target.
#[derive(Default)]
pub struct PortfolioStore {
    positions: Mutex<Vec<Position>>,
}

impl PortfolioStore {
    pub fn new(positions: Vec<Position>) -> Self {
        Self {
            positions: Mutex::new(positions),
        }
    }

    /// Seed data for the demo portfolio page.
    pub fn demo() -> Self {
        let demo = [
            ("SBMX", 350_000.0, 35.0, 30.0, "#2979FF"),
            ("TMOS", 250_000.0, 25.0, 25.0, "#00E676"),
            ("OBLG", 200_000.0, 20.0, 25.0, "#FF9100"),
            ("GOLD", 120_000.0, 12.0, 10.0, "#FFD600"),
            ("LQDT", 80_000.0, 8.0, 10.0, "#AB47BC"),
        ];
        Self::new(
            demo.iter()
                .map(|(symbol, notional, allocation, target, color)| Position {
                    symbol: symbol.to_string(),
                    notional: *notional,
                    allocation: *allocation,
                    target_allocation: *target,
                    color: color.to_string(),
                })
                .collect(),
        )
    }

    pub fn positions(&self) -> Vec<Position> {
        self.lock().clone()
    }

    /// Inserts or replaces the position with the same symbol.
    pub fn upsert(&self, position: Position) {
        let mut positions = self.lock();
        match positions.iter_mut().find(|p| p.symbol == position.symbol) {
            Some(existing) => *existing = position,
            None => positions.push(position),
        }
    }

    pub fn remove(&self, symbol: &str) -> Option<Position> {
        let mut positions = self.lock();
        let idx = positions.iter().position(|p| p.symbol == symbol)?;
        Some(positions.remove(idx))
    }

    pub fn total_allocation(&self) -> f64 {
        self.lock().iter().map(|p| p.allocation).sum()
    }

    pub fn total_notional(&self) -> f64 {
        self.lock().iter().map(|p| p.notional).sum()
    }

    pub fn drift(&self, symbol: &str) -> Option<f64> {
        self.lock()
            .iter()
            .find(|p| p.symbol == symbol)
            .map(Position::drift)
    }

    pub fn to_metrics_request(&self, risk_free_rate: Option<f64>) -> PortfolioMetricsRequest {
        let total = self.total_allocation();
        if (total - 100.0).abs() > ALLOCATION_TOLERANCE_PCT {
            warn!("Portfolio allocations sum to {:.2}%, not 100%", total);
        }

        PortfolioMetricsRequest {
            positions: self.positions(),
            risk_free_rate,
            confidence_level: None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Position>> {
        self.positions.lock().unwrap_or_else(|e| e.into_inner())
    }
}
