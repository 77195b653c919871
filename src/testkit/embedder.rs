//! Deterministic embedders for matching tests.
//!
//! - **`ConstantEmbedder`**: every text maps to the same vector.
//!   Best for: assignment order tests, where every pair scores 1.
//! - **`ScriptedEmbedder`**: exact title → vector table with a fallback.
//!   Best for: end-to-end runs with chosen similarities.
//! - **`FailingEmbedder`**: wraps another embedder and fails any batch that
//!   contains a poisoned title.
//!   Best for: checking that one failing keyword does not stop a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{EmbeddingError, Result};
use crate::port::Embedder;

/// Embedder that returns the same vector for every text.
#[derive(Debug, Clone)]
pub struct ConstantEmbedder {
    pub vector: Vec<f32>,
}

#[async_trait]
impl Embedder for ConstantEmbedder {
    fn name(&self) -> &'static str {
        "constant"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| self.vector.clone()).collect())
    }
}

/// Embedder driven by a fixed title table.
///
/// Unknown titles get `fallback`. Calls are counted so tests can assert on
/// caching.
#[derive(Debug, Default)]
pub struct ScriptedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
    calls: AtomicUsize,
}

impl ScriptedEmbedder {
    /// Create an embedder whose unknown titles map to `fallback`.
    #[must_use]
    pub fn new(fallback: Vec<f32>) -> Self {
        Self {
            vectors: HashMap::new(),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Script the vector for one title.
    #[must_use]
    pub fn with(mut self, title: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(title.to_string(), vector);
        self
    }

    /// Number of `embed` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for ScriptedEmbedder {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| self.fallback.clone())
            })
            .collect())
    }
}

/// Embedder that fails batches containing a poisoned title.
pub struct FailingEmbedder {
    inner: Arc<dyn Embedder>,
    poisoned: String,
}

impl FailingEmbedder {
    pub fn new(inner: Arc<dyn Embedder>, poisoned: impl Into<String>) -> Self {
        Self {
            inner,
            poisoned: poisoned.into(),
        }
    }
}

#[async_trait]
impl Embedder for FailingEmbedder {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().any(|t| *t == self.poisoned) {
            return Err(EmbeddingError::Provider {
                provider: "failing",
                reason: format!("refused {:?}", self.poisoned),
            }
            .into());
        }
        self.inner.embed(texts).await
    }
}
