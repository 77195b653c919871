//! Embedding provider factory.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::embedding::{HashingEmbedder, OpenAiEmbedder};
use crate::error::Result;
use crate::infrastructure::config::embedding::EmbeddingProvider;
use crate::infrastructure::config::settings::Config;
use crate::port::Embedder;

/// Build the configured embedding provider.
///
/// # Errors
///
/// Returns an error if the OpenAI provider is selected and
/// `OPENAI_API_KEY` is not set.
pub fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    let embedding = &config.embedding;
    let embedder: Arc<dyn Embedder> = match embedding.provider {
        EmbeddingProvider::Hashing => Arc::new(HashingEmbedder::new(embedding.dimension)),
        EmbeddingProvider::OpenAi => Arc::new(OpenAiEmbedder::from_env(
            &embedding.openai.model,
            &embedding.openai.base_url,
        )?),
    };

    info!(provider = embedder.name(), "Embedding provider initialized");
    Ok(embedder)
}
