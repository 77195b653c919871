//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Market`], [`MatchedPair`] and
//! [`Quote`] so tests focus on assertions rather than construction
//! boilerplate.

use rust_decimal::Decimal;

use crate::domain::{Market, MarketId, MatchedPair, Quote};

/// Create a [`Market`] from an id and title.
pub fn market(id: &str, title: &str) -> Market {
    Market::new(id, title)
}

/// Create markets from `(id, title)` rows.
pub fn markets(rows: &[(&str, &str)]) -> Vec<Market> {
    rows.iter().map(|(id, title)| market(id, title)).collect()
}

/// Create a [`MarketId`] from a string.
pub fn market_id(id: &str) -> MarketId {
    MarketId::from(id)
}

/// Create a [`MatchedPair`] with placeholder titles.
pub fn pair(polymarket_id: &str, kalshi_id: &str) -> MatchedPair {
    MatchedPair {
        polymarket_id: market_id(polymarket_id),
        polymarket_title: format!("Polymarket {polymarket_id}"),
        kalshi_id: market_id(kalshi_id),
        kalshi_title: format!("Kalshi {kalshi_id}"),
        similarity_score: 1.0,
    }
}

/// Create a [`Quote`] as `(polymarket_yes, polymarket_no, kalshi_yes, kalshi_no)`.
pub fn quote(
    polymarket_yes: Decimal,
    polymarket_no: Decimal,
    kalshi_yes: Decimal,
    kalshi_no: Decimal,
) -> Quote {
    Quote::new(polymarket_yes, polymarket_no, kalshi_yes, kalshi_no)
}
