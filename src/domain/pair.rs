//! Matched market pairs emitted by the semantic matcher.

use serde::{Deserialize, Serialize};

use super::id::MarketId;

/// Two listings judged to describe the same contract.
///
/// Serializes to the matched-pair table row consumed by review and pricing
/// collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub polymarket_id: MarketId,
    pub polymarket_title: String,
    pub kalshi_id: MarketId,
    pub kalshi_title: String,
    /// Cosine similarity of the two title embeddings, in `[-1, 1]`.
    pub similarity_score: f32,
}
