//! Evaluate matched pairs against a table of live quotes.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use super::allocator::Allocator;
use crate::domain::{Arbitrage, MarketId, MatchedPair, Quote};

/// Quotes keyed by `(polymarket_id, kalshi_id)`.
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    quotes: HashMap<(MarketId, MarketId), Quote>,
}

impl QuoteBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the quote for a pair, replacing any earlier one.
    pub fn insert(&mut self, polymarket_id: MarketId, kalshi_id: MarketId, quote: Quote) {
        self.quotes.insert((polymarket_id, kalshi_id), quote);
    }

    #[must_use]
    pub fn get(&self, polymarket_id: &MarketId, kalshi_id: &MarketId) -> Option<&Quote> {
        self.quotes
            .get(&(polymarket_id.clone(), kalshi_id.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<(MarketId, MarketId, Quote)> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = (MarketId, MarketId, Quote)>>(iter: I) -> Self {
        let mut book = Self::new();
        for (polymarket_id, kalshi_id, quote) in iter {
            book.insert(polymarket_id, kalshi_id, quote);
        }
        book
    }
}

/// One evaluated pair.
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub pair: MatchedPair,
    pub quote: Quote,
    pub result: Arbitrage,
}

/// Outcome of a scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Evaluated pairs in input order.
    pub entries: Vec<ScanEntry>,
    /// Pairs with no quote in the book.
    pub unquoted: Vec<MatchedPair>,
}

impl ScanReport {
    /// Entries that produced a hedge.
    pub fn found(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries.iter().filter(|e| e.result.is_found())
    }

    /// The hedge with the best worst-case ROI.
    #[must_use]
    pub fn best(&self) -> Option<&ScanEntry> {
        self.found()
            .max_by_key(|e| e.result.allocation().map(|a| a.min_roi))
    }
}

/// Run the allocator over every quoted pair.
#[must_use]
pub fn scan(allocator: &Allocator, pairs: &[MatchedPair], quotes: &QuoteBook) -> ScanReport {
    let mut report = ScanReport::default();
    for pair in pairs {
        let Some(quote) = quotes.get(&pair.polymarket_id, &pair.kalshi_id) else {
            warn!(
                polymarket = %pair.polymarket_id,
                kalshi = %pair.kalshi_id,
                "No quote for pair"
            );
            report.unquoted.push(pair.clone());
            continue;
        };
        report.entries.push(ScanEntry {
            pair: pair.clone(),
            quote: *quote,
            result: allocator.allocate(quote),
        });
    }

    info!(
        pairs = pairs.len(),
        quoted = report.entries.len(),
        hedges = report.found().count(),
        "Scan complete"
    );
    report
}
