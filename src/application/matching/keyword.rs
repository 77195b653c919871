//! Keyword pruning index.
//!
//! Narrows the `n × m` cross-venue candidate space to pairs that share a
//! moderately rare word. Words found on only one venue cannot link a pair
//! and are dropped; words at or above the rarity ceiling are too common to
//! discriminate and are dropped too.
//!
//! A market whose title has no surviving word is never scored. That is a
//! known coverage gap, reported by [`KeywordIndex::unreachable`] rather than
//! papered over.

use std::collections::{HashMap, HashSet};

use super::tokenize::{word_counts, word_set};
use crate::domain::{KeywordEntry, Market, MarketId, Venue};

/// Keyword entries ordered rarest first.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    entries: Vec<KeywordEntry>,
}

impl KeywordIndex {
    /// Build the index from both venue tables.
    ///
    /// Entries are sorted by ascending `combined_frequency`, ties broken by
    /// word, and only kept when `combined_frequency < rarity_ceiling`.
    #[must_use]
    pub fn build(polymarket: &[Market], kalshi: &[Market], rarity_ceiling: usize) -> Self {
        let poly_counts = word_counts(polymarket.iter().map(Market::title));
        let kalshi_counts = word_counts(kalshi.iter().map(Market::title));

        let mut entries: Vec<KeywordEntry> = poly_counts
            .iter()
            .filter_map(|(word, poly)| {
                let kalshi = kalshi_counts.get(word)?;
                let combined_frequency = poly + kalshi;
                (combined_frequency < rarity_ceiling).then(|| KeywordEntry {
                    word: word.clone(),
                    combined_frequency,
                    polymarket_ids: Vec::new(),
                    kalshi_ids: Vec::new(),
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            a.combined_frequency
                .cmp(&b.combined_frequency)
                .then_with(|| a.word.cmp(&b.word))
        });

        let positions: HashMap<String, usize> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.word.clone(), idx))
            .collect();

        for market in polymarket {
            for word in word_set(market.title()) {
                if let Some(&idx) = positions.get(&word) {
                    entries[idx].polymarket_ids.push(market.id().clone());
                }
            }
        }
        for market in kalshi {
            for word in word_set(market.title()) {
                if let Some(&idx) = positions.get(&word) {
                    entries[idx].kalshi_ids.push(market.id().clone());
                }
            }
        }

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for a word.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&KeywordEntry> {
        self.entries.iter().find(|entry| entry.word == word)
    }

    /// Markets from `venue`'s table that appear under no keyword and
    /// therefore can never be matched in this run.
    ///
    /// Only `venue`'s id lists count as coverage, since the two venues'
    /// id spaces may overlap.
    #[must_use]
    pub fn unreachable<'a>(&self, venue: Venue, markets: &'a [Market]) -> Vec<&'a MarketId> {
        let covered: HashSet<&MarketId> = self
            .entries
            .iter()
            .flat_map(|entry| match venue {
                Venue::Polymarket => &entry.polymarket_ids,
                Venue::Kalshi => &entry.kalshi_ids,
            })
            .collect();
        markets
            .iter()
            .map(Market::id)
            .filter(|id| !covered.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly() -> Vec<Market> {
        vec![
            Market::new("p1", "Will X win the election?"),
            Market::new("p2", "Fed rate cut in March?"),
            Market::new("p3", "Will the Fed hike rates?"),
        ]
    }

    fn kalshi() -> Vec<Market> {
        vec![
            Market::new("K-ELEC", "X Election Winner"),
            Market::new("K-FED", "Fed decision in March"),
        ]
    }

    #[test]
    fn keeps_only_words_shared_across_venues() {
        let index = KeywordIndex::build(&poly(), &kalshi(), 150);
        let words: Vec<&str> = index.entries().iter().map(|e| e.word.as_str()).collect();
        assert!(words.contains(&"election"));
        assert!(words.contains(&"fed"));
        assert!(!words.contains(&"winner"));
        assert!(!words.contains(&"hike"));
    }

    #[test]
    fn orders_by_combined_frequency_then_word() {
        let index = KeywordIndex::build(&poly(), &kalshi(), 150);
        let words: Vec<(&str, usize)> = index
            .entries()
            .iter()
            .map(|e| (e.word.as_str(), e.combined_frequency))
            .collect();
        assert_eq!(
            words,
            vec![("election", 2), ("march", 2), ("x", 2), ("fed", 3)]
        );
    }

    #[test]
    fn membership_uses_title_sets_in_table_order() {
        let index = KeywordIndex::build(&poly(), &kalshi(), 150);
        let fed = index.get("fed").unwrap();
        assert_eq!(
            fed.polymarket_ids,
            vec![MarketId::from("p2"), MarketId::from("p3")]
        );
        assert_eq!(fed.kalshi_ids, vec![MarketId::from("K-FED")]);
        assert_eq!(fed.candidate_pairs(), 2);
    }

    #[test]
    fn repeated_word_counts_twice_but_lists_id_once() {
        let poly = vec![Market::new("p1", "Bitcoin bitcoin halving")];
        let kalshi = vec![Market::new("K-BTC", "Bitcoin price")];
        let index = KeywordIndex::build(&poly, &kalshi, 150);
        let entry = index.get("bitcoin").unwrap();
        assert_eq!(entry.combined_frequency, 3);
        assert_eq!(entry.polymarket_ids, vec![MarketId::from("p1")]);
    }

    #[test]
    fn ceiling_is_exclusive() {
        let index = KeywordIndex::build(&poly(), &kalshi(), 3);
        assert!(index.get("fed").is_none());
        assert!(index.get("election").is_some());
    }

    #[test]
    fn raising_ceiling_never_removes_entries() {
        let low = KeywordIndex::build(&poly(), &kalshi(), 3);
        let high = KeywordIndex::build(&poly(), &kalshi(), 4);
        for entry in low.entries() {
            assert_eq!(high.get(&entry.word), Some(entry));
        }
        assert!(high.len() >= low.len());
    }

    #[test]
    fn reports_markets_without_qualifying_keyword() {
        let index = KeywordIndex::build(&poly(), &kalshi(), 150);
        let markets = poly();
        let unreachable = index.unreachable(Venue::Polymarket, &markets);
        assert!(unreachable.is_empty());

        let lonely = vec![Market::new("p9", "Ethereum merge")];
        assert_eq!(
            index.unreachable(Venue::Polymarket, &lonely),
            vec![&MarketId::from("p9")]
        );
    }

    #[test]
    fn coverage_is_counted_per_venue() {
        // Kalshi "7" is covered by "fed"; Polymarket "7" shares the id but
        // has no keyword of its own.
        let poly = vec![
            Market::new("1", "Fed cut in March"),
            Market::new("7", "Ethereum merge"),
        ];
        let kalshi = vec![Market::new("7", "Fed decision")];
        let index = KeywordIndex::build(&poly, &kalshi, 150);

        assert_eq!(
            index.unreachable(Venue::Polymarket, &poly),
            vec![&MarketId::from("7")]
        );
        assert!(index.unreachable(Venue::Kalshi, &kalshi).is_empty());
    }

    #[test]
    fn empty_titles_contribute_nothing() {
        let poly = vec![Market::new("p1", ""), Market::new("p2", "???")];
        let index = KeywordIndex::build(&poly, &kalshi(), 150);
        assert!(index.is_empty());
    }
}
