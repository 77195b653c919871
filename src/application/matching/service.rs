//! Matching run over both venue tables.
//!
//! # Architecture
//!
//! ```text
//! polymarket + kalshi tables
//!         |
//!         v
//!   KeywordIndex (rarest shared words first)
//!         |
//!         +-- optional concurrent cache warm-up (no ledger access)
//!         |
//!         v
//!   SemanticMatcher, one keyword at a time  <-- &mut AssignmentLedger
//!         |
//!         v
//!   MatchReport { pairs, ... }
//! ```
//!
//! Keyword passes run sequentially so every ledger update happens on one
//! task, which keeps the output deterministic for a deterministic embedder.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::assignment::AssignmentPolicy;
use super::cache::EmbeddingCache;
use super::keyword::KeywordIndex;
use super::ledger::AssignmentLedger;
use super::matcher::{MarketTable, SemanticMatcher};
use crate::domain::market::ensure_unique_ids;
use crate::domain::{Market, MatchedPair, Venue};
use crate::error::Result;
use crate::port::Embedder;

/// Tunables for one matching run.
#[derive(Debug, Clone)]
pub struct MatchingSettings {
    /// Keywords at or above this combined frequency are dropped.
    pub rarity_ceiling: usize,
    /// Pairs must score strictly above this cosine similarity.
    pub similarity_threshold: f32,
    pub assignment: AssignmentPolicy,
    /// Concurrent embedding batches used to pre-fill the cache. 1 disables
    /// the warm-up.
    pub warmup_concurrency: usize,
    pub warmup_batch_size: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            rarity_ceiling: 150,
            similarity_threshold: 0.7,
            assignment: AssignmentPolicy::Greedy,
            warmup_concurrency: 1,
            warmup_batch_size: 64,
        }
    }
}

/// Outcome of a matching run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    /// Accepted pairs in keyword order, then row order.
    pub pairs: Vec<MatchedPair>,
    pub keywords_total: usize,
    /// Keywords that produced at least one pair.
    pub keywords_matched: usize,
    /// Keywords with no live candidates on one side.
    pub keywords_skipped: usize,
    /// Keywords whose embedding call failed.
    pub keywords_failed: usize,
    /// Polymarket markets with no qualifying keyword.
    pub unreachable_polymarket: usize,
    /// Kalshi markets with no qualifying keyword.
    pub unreachable_kalshi: usize,
}

/// Runs keyword pruning and semantic matching end to end.
pub struct MatchingService {
    embedder: Arc<EmbeddingCache>,
    settings: MatchingSettings,
}

impl MatchingService {
    /// Create a service; `embedder` is wrapped in a per-service cache.
    pub fn new(embedder: Arc<dyn Embedder>, settings: MatchingSettings) -> Self {
        Self {
            embedder: Arc::new(EmbeddingCache::new(embedder)),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &MatchingSettings {
        &self.settings
    }

    /// Match the two venue tables.
    ///
    /// A keyword whose embedding fails is logged and skipped; results from
    /// other keywords are kept.
    ///
    /// # Errors
    ///
    /// Returns an error only if a venue table repeats a market id.
    pub async fn run(&self, polymarket: &[Market], kalshi: &[Market]) -> Result<MatchReport> {
        ensure_unique_ids(Venue::Polymarket, polymarket)?;
        ensure_unique_ids(Venue::Kalshi, kalshi)?;

        let started = Instant::now();
        let index = KeywordIndex::build(polymarket, kalshi, self.settings.rarity_ceiling);
        let unreachable_polymarket = index.unreachable(Venue::Polymarket, polymarket).len();
        let unreachable_kalshi = index.unreachable(Venue::Kalshi, kalshi).len();
        info!(
            polymarket = polymarket.len(),
            kalshi = kalshi.len(),
            keywords = index.len(),
            unreachable_polymarket,
            unreachable_kalshi,
            "Keyword index built"
        );

        if self.settings.warmup_concurrency > 1 {
            self.warm_up(&index, polymarket, kalshi).await;
        }

        let poly_table = MarketTable::new(polymarket);
        let kalshi_table = MarketTable::new(kalshi);
        let matcher = SemanticMatcher::new(
            self.embedder.clone(),
            self.settings.similarity_threshold,
            self.settings.assignment,
        );
        let mut ledger = AssignmentLedger::new();
        let mut report = MatchReport {
            keywords_total: index.len(),
            unreachable_polymarket,
            unreachable_kalshi,
            ..MatchReport::default()
        };

        for entry in index.entries() {
            let live = entry
                .polymarket_ids
                .iter()
                .any(|id| !ledger.is_polymarket_used(id))
                && entry.kalshi_ids.iter().any(|id| !ledger.is_kalshi_used(id));
            if !live {
                debug!(keyword = %entry.word, "No live candidates, skipping");
                report.keywords_skipped += 1;
                continue;
            }

            let timer = Instant::now();
            match matcher
                .match_keyword(entry, &poly_table, &kalshi_table, &mut ledger)
                .await
            {
                Ok(pairs) if pairs.is_empty() => {
                    debug!(keyword = %entry.word, "No markets over threshold");
                }
                Ok(pairs) => {
                    info!(
                        keyword = %entry.word,
                        pairs = pairs.len(),
                        elapsed_ms = timer.elapsed().as_millis() as u64,
                        "Found similar markets"
                    );
                    report.keywords_matched += 1;
                    report.pairs.extend(pairs);
                }
                Err(e) => {
                    warn!(keyword = %entry.word, error = %e, "Keyword matching failed");
                    report.keywords_failed += 1;
                }
            }
        }

        let (used_poly, used_kalshi) = ledger.consumed();
        info!(
            pairs = report.pairs.len(),
            keywords_matched = report.keywords_matched,
            keywords_failed = report.keywords_failed,
            consumed_polymarket = used_poly,
            consumed_kalshi = used_kalshi,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Matching run complete"
        );

        Ok(report)
    }

    /// Embed every indexed title ahead of the sequential pass.
    ///
    /// Failures are ignored here; the keyword pass retries misses and
    /// reports them per keyword.
    async fn warm_up(&self, index: &KeywordIndex, polymarket: &[Market], kalshi: &[Market]) {
        let poly_table = MarketTable::new(polymarket);
        let kalshi_table = MarketTable::new(kalshi);
        let (poly_table, kalshi_table) = (&poly_table, &kalshi_table);
        let mut seen = HashSet::new();
        let titles: Vec<String> = index
            .entries()
            .iter()
            .flat_map(move |entry| {
                let poly = entry
                    .polymarket_ids
                    .iter()
                    .filter_map(move |id| poly_table.get(id));
                let kalshi = entry
                    .kalshi_ids
                    .iter()
                    .filter_map(move |id| kalshi_table.get(id));
                poly.chain(kalshi).map(Market::title)
            })
            .filter(|title| seen.insert(*title))
            .map(str::to_string)
            .collect();

        let batch_size = self.settings.warmup_batch_size.max(1);
        let batches: Vec<Vec<String>> = titles.chunks(batch_size).map(<[String]>::to_vec).collect();
        let batch_count = batches.len();
        let timer = Instant::now();

        let failures = stream::iter(batches)
            .map(|batch| {
                let embedder = self.embedder.clone();
                async move { embedder.embed(&batch).await }
            })
            .buffer_unordered(self.settings.warmup_concurrency)
            .filter(|result| std::future::ready(result.is_err()))
            .count()
            .await;

        if failures > 0 {
            warn!(batches = batch_count, failures, "Embedding warm-up incomplete");
        }
        debug!(
            titles = titles.len(),
            batches = batch_count,
            cached = self.embedder.len(),
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "Embedding cache warmed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::embedder::{ConstantEmbedder, FailingEmbedder};

    fn service(settings: MatchingSettings) -> MatchingService {
        MatchingService::new(
            Arc::new(ConstantEmbedder {
                vector: vec![1.0, 0.0],
            }),
            settings,
        )
    }

    #[tokio::test]
    async fn duplicate_ids_abort_before_matching() {
        let poly = vec![Market::new("1", "a election"), Market::new("1", "b election")];
        let kalshi = vec![Market::new("K", "election")];
        let result = service(MatchingSettings::default()).run(&poly, &kalshi).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn each_id_appears_in_at_most_one_pair() {
        let poly = vec![
            Market::new("1", "Fed cut March"),
            Market::new("2", "Fed hike March"),
            Market::new("3", "Fed pause"),
        ];
        let kalshi = vec![
            Market::new("K1", "Fed March decision"),
            Market::new("K2", "Fed cut"),
        ];

        let report = service(MatchingSettings::default())
            .run(&poly, &kalshi)
            .await
            .unwrap();

        let mut poly_ids = HashSet::new();
        let mut kalshi_ids = HashSet::new();
        for pair in &report.pairs {
            assert!(poly_ids.insert(pair.polymarket_id.clone()));
            assert!(kalshi_ids.insert(pair.kalshi_id.clone()));
        }
        assert_eq!(report.pairs.len(), 2);
    }

    #[tokio::test]
    async fn warm_up_does_not_change_results() {
        let poly = vec![Market::new("1", "Fed cut"), Market::new("2", "Fed hike")];
        let kalshi = vec![Market::new("K1", "Fed cut"), Market::new("K2", "Fed hold")];

        let plain = service(MatchingSettings::default())
            .run(&poly, &kalshi)
            .await
            .unwrap();
        let warmed = service(MatchingSettings {
            warmup_concurrency: 4,
            warmup_batch_size: 1,
            ..MatchingSettings::default()
        })
        .run(&poly, &kalshi)
        .await
        .unwrap();

        assert_eq!(plain.pairs, warmed.pairs);
    }

    #[tokio::test]
    async fn counts_unreachable_markets() {
        let poly = vec![Market::new("1", "Fed cut"), Market::new("2", "Ethereum merge")];
        let kalshi = vec![Market::new("K1", "Fed cut")];

        let report = service(MatchingSettings::default())
            .run(&poly, &kalshi)
            .await
            .unwrap();

        assert_eq!(report.unreachable_polymarket, 1);
        assert_eq!(report.unreachable_kalshi, 0);
    }

    #[tokio::test]
    async fn failing_keyword_does_not_stop_the_run() {
        let poly = vec![Market::new("1", "Fed cut"), Market::new("2", "Bitcoin rally")];
        let kalshi = vec![Market::new("K1", "Fed cut"), Market::new("K2", "Bitcoin rally")];
        let inner = Arc::new(ConstantEmbedder {
            vector: vec![1.0, 0.0],
        });
        let service = MatchingService::new(
            Arc::new(FailingEmbedder::new(inner, "Bitcoin rally")),
            MatchingSettings::default(),
        );

        let report = service.run(&poly, &kalshi).await.unwrap();

        // bitcoin, cut, fed, rally: cut pairs 1-K1, fed is then dead, and
        // both bitcoin and rally hit the poisoned title.
        assert_eq!(report.keywords_total, 4);
        assert_eq!(report.keywords_matched, 1);
        assert_eq!(report.keywords_skipped, 1);
        assert_eq!(report.keywords_failed, 2);
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].kalshi_id.as_str(), "K1");
    }
}
