//! Market matching configuration.

use serde::{Deserialize, Serialize};

use crate::application::matching::{AssignmentPolicy, MatchingSettings};

/// `[matching]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Keywords whose combined frequency reaches this value are dropped.
    ///
    /// Defaults to 150.
    pub rarity_ceiling: usize,

    /// Minimum cosine similarity, exclusive. Defaults to 0.7.
    pub similarity_threshold: f32,

    /// `greedy` or `optimal`. Defaults to greedy.
    pub assignment: AssignmentPolicy,

    /// Concurrent embedding batches used to pre-fill the title cache.
    ///
    /// 1 disables the warm-up.
    pub warmup_concurrency: usize,

    /// Titles per warm-up batch.
    pub warmup_batch_size: usize,
}

impl MatchingConfig {
    #[must_use]
    pub fn settings(&self) -> MatchingSettings {
        MatchingSettings {
            rarity_ceiling: self.rarity_ceiling,
            similarity_threshold: self.similarity_threshold,
            assignment: self.assignment,
            warmup_concurrency: self.warmup_concurrency,
            warmup_batch_size: self.warmup_batch_size,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let defaults = MatchingSettings::default();
        Self {
            rarity_ceiling: defaults.rarity_ceiling,
            similarity_threshold: defaults.similarity_threshold,
            assignment: defaults.assignment,
            warmup_concurrency: defaults.warmup_concurrency,
            warmup_batch_size: defaults.warmup_batch_size,
        }
    }
}
