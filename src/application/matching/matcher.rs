//! Semantic matcher for one keyword's candidate block.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::assignment::AssignmentPolicy;
use super::ledger::AssignmentLedger;
use super::similarity::SimilarityMatrix;
use crate::domain::{KeywordEntry, Market, MarketId, MatchedPair};
use crate::error::{EmbeddingError, Result};
use crate::port::Embedder;

/// Id → market lookup for one venue's table.
#[derive(Debug, Clone)]
pub struct MarketTable<'a> {
    by_id: HashMap<&'a MarketId, &'a Market>,
}

impl<'a> MarketTable<'a> {
    #[must_use]
    pub fn new(markets: &'a [Market]) -> Self {
        Self {
            by_id: markets.iter().map(|m| (m.id(), m)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &MarketId) -> Option<&'a Market> {
        self.by_id.get(id).copied()
    }

    /// Resolve ids to markets, preserving order and skipping unknown ids.
    fn resolve(&self, ids: &[MarketId]) -> Vec<&'a Market> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }
}

/// Scores a keyword's shortlists with title embeddings and selects pairs.
pub struct SemanticMatcher {
    embedder: Arc<dyn Embedder>,
    threshold: f32,
    policy: AssignmentPolicy,
}

impl SemanticMatcher {
    pub fn new(embedder: Arc<dyn Embedder>, threshold: f32, policy: AssignmentPolicy) -> Self {
        Self {
            embedder,
            threshold,
            policy,
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[must_use]
    pub fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    /// Match the markets listed under `entry`, consuming ids in `ledger`.
    ///
    /// Ids already in the ledger are dropped before embedding, so only live
    /// titles cost an embedding call. Returns an empty list when either side
    /// has no live candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding provider fails or returns a
    /// malformed batch. The ledger is left untouched in that case.
    pub async fn match_keyword(
        &self,
        entry: &KeywordEntry,
        polymarket: &MarketTable<'_>,
        kalshi: &MarketTable<'_>,
        ledger: &mut AssignmentLedger,
    ) -> Result<Vec<MatchedPair>> {
        let rows: Vec<&Market> = polymarket
            .resolve(&entry.polymarket_ids)
            .into_iter()
            .filter(|m| !ledger.is_polymarket_used(m.id()))
            .collect();
        let cols: Vec<&Market> = kalshi
            .resolve(&entry.kalshi_ids)
            .into_iter()
            .filter(|m| !ledger.is_kalshi_used(m.id()))
            .collect();

        if rows.is_empty() || cols.is_empty() {
            debug!(
                keyword = %entry.word,
                polymarket = rows.len(),
                kalshi = cols.len(),
                "No live candidates for keyword"
            );
            return Ok(Vec::new());
        }

        let row_vectors = self.embed_titles(&rows).await?;
        let col_vectors = self.embed_titles(&cols).await?;
        let matrix = SimilarityMatrix::cosine(&row_vectors, &col_vectors)?;

        let row_ids: Vec<&MarketId> = rows.iter().map(|m| m.id()).collect();
        let col_ids: Vec<&MarketId> = cols.iter().map(|m| m.id()).collect();
        let accepted = self
            .policy
            .assign(&matrix, &row_ids, &col_ids, self.threshold, ledger)?;

        Ok(accepted
            .into_iter()
            .map(|a| {
                let poly = rows[a.row];
                let kalshi = cols[a.col];
                MatchedPair {
                    polymarket_id: poly.id().clone(),
                    polymarket_title: poly.title().to_string(),
                    kalshi_id: kalshi.id().clone(),
                    kalshi_title: kalshi.title().to_string(),
                    similarity_score: a.score,
                }
            })
            .collect())
    }

    async fn embed_titles(&self, markets: &[&Market]) -> Result<Vec<Vec<f32>>> {
        let titles: Vec<String> = markets.iter().map(|m| m.title().to_string()).collect();
        let vectors = self.embedder.embed(&titles).await?;
        if vectors.len() != titles.len() {
            return Err(EmbeddingError::RowCountMismatch {
                expected: titles.len(),
                actual: vectors.len(),
            }
            .into());
        }
        Ok(vectors)
    }
}
