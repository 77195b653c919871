//! Keyword entries produced by the pruning index.

use super::id::MarketId;

/// A shared, moderately rare word and the markets whose titles contain it.
///
/// An entry only exists when `combined_frequency` is below the configured
/// rarity ceiling and the word occurs on both venues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    /// Normalized token.
    pub word: String,
    /// Occurrences across all titles of both venues, repeats included.
    pub combined_frequency: usize,
    /// Polymarket markets whose title contains the word, in table order.
    pub polymarket_ids: Vec<MarketId>,
    /// Kalshi markets whose title contains the word, in table order.
    pub kalshi_ids: Vec<MarketId>,
}

impl KeywordEntry {
    /// Number of cross-venue candidate pairs this keyword can produce.
    #[must_use]
    pub fn candidate_pairs(&self) -> usize {
        self.polymarket_ids.len() * self.kalshi_ids.len()
    }
}
