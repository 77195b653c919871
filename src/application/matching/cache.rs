//! Title embedding cache.
//!
//! A market title shows up under every keyword it contains, so without a
//! cache one run embeds the same title many times.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{EmbeddingError, Result};
use crate::port::Embedder;

/// [`Embedder`] decorator that remembers vectors by exact title text.
///
/// Only cache misses are forwarded to the inner provider, in one batch.
pub struct EmbeddingCache {
    inner: Arc<dyn Embedder>,
    vectors: DashMap<String, Vec<f32>>,
}

impl EmbeddingCache {
    pub fn new(inner: Arc<dyn Embedder>) -> Self {
        Self {
            inner,
            vectors: DashMap::new(),
        }
    }

    /// Number of cached titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[async_trait]
impl Embedder for EmbeddingCache {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut misses: Vec<String> = Vec::new();
        for text in texts {
            if !self.vectors.contains_key(text) && !misses.contains(text) {
                misses.push(text.clone());
            }
        }

        if !misses.is_empty() {
            let fresh = self.inner.embed(&misses).await?;
            if fresh.len() != misses.len() {
                return Err(EmbeddingError::RowCountMismatch {
                    expected: misses.len(),
                    actual: fresh.len(),
                }
                .into());
            }
            for (text, vector) in misses.into_iter().zip(fresh) {
                self.vectors.insert(text, vector);
            }
        }

        texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .map(|v| v.value().clone())
                    .ok_or_else(|| {
                        EmbeddingError::Provider {
                            provider: self.inner.name(),
                            reason: format!("no vector cached for {text:?}"),
                        }
                        .into()
                    })
            })
            .collect()
    }
}
