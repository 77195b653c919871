//! Embedding provider configuration.
//!
//! API keys are read from the `OPENAI_API_KEY` environment variable at
//! runtime, never from the config file.

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::embedding::openai::DEFAULT_BASE_URL;

/// `[embedding]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider used to embed market titles. Defaults to `hashing`.
    pub provider: EmbeddingProvider,

    /// Output width of the hashing provider. Defaults to 512.
    pub dimension: usize,

    /// OpenAI-specific settings, used when `provider = "openai"`.
    pub openai: OpenAiEmbeddingConfig,
}

/// Embedding provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Offline feature hashing.
    #[default]
    Hashing,
    /// OpenAI embeddings API.
    #[serde(rename = "openai")]
    OpenAi,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            dimension: 512,
            openai: OpenAiEmbeddingConfig::default(),
        }
    }
}

/// OpenAI-specific configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiEmbeddingConfig {
    /// Model identifier. Defaults to "text-embedding-3-small".
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// API base URL, without the `/v1/embeddings` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for OpenAiEmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            base_url: default_base_url(),
        }
    }
}

fn default_openai_model() -> String {
    "text-embedding-3-small".into()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
