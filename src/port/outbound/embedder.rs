//! Sentence-embedding port for the semantic matcher.
//!
//! The matcher only relies on the contract below: embeddings are
//! deterministic for a given text, share one fixed dimension, and are
//! meaningfully comparable with cosine similarity. Vectors need not be
//! normalized; the matcher normalizes them itself.

use async_trait::async_trait;

use crate::error::Result;

/// Maps market titles to fixed-width vectors.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the cache warm-up can issue
/// batches concurrently.
///
/// # Errors
///
/// [`embed`](Self::embed) returns an error when the provider is unreachable
/// or returns a malformed batch. The matching run treats such errors as
/// local to one keyword.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Embed a batch of texts, returning one row per input in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
