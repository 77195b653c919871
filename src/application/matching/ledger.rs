//! Assignment ledger shared across keyword passes.

use std::collections::HashSet;

use crate::domain::MarketId;

/// Market ids already consumed during one matching run, one set per venue.
///
/// Once an id is recorded it is excluded from every later keyword, which
/// keeps the run's output a global one-to-one assignment. The ledger is owned
/// by the run and threaded through each matcher call by `&mut`.
#[derive(Debug, Clone, Default)]
pub struct AssignmentLedger {
    polymarket: HashSet<MarketId>,
    kalshi: HashSet<MarketId>,
}

impl AssignmentLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_polymarket_used(&self, id: &MarketId) -> bool {
        self.polymarket.contains(id)
    }

    #[must_use]
    pub fn is_kalshi_used(&self, id: &MarketId) -> bool {
        self.kalshi.contains(id)
    }

    /// Whether either side of the pair has already been consumed.
    #[must_use]
    pub fn is_blocked(&self, polymarket_id: &MarketId, kalshi_id: &MarketId) -> bool {
        self.is_polymarket_used(polymarket_id) || self.is_kalshi_used(kalshi_id)
    }

    /// Consume both ids.
    pub fn consume(&mut self, polymarket_id: &MarketId, kalshi_id: &MarketId) {
        self.polymarket.insert(polymarket_id.clone());
        self.kalshi.insert(kalshi_id.clone());
    }

    /// Number of consumed ids per venue, as `(polymarket, kalshi)`.
    #[must_use]
    pub fn consumed(&self) -> (usize, usize) {
        (self.polymarket.len(), self.kalshi.len())
    }
}
