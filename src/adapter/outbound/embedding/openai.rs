//! OpenAI embeddings client.
//!
//! Provides an implementation of the [`Embedder`] trait for the OpenAI
//! Embeddings API. Any service exposing the same `/v1/embeddings` route
//! can be used by overriding the base URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EmbeddingError, Error, Result};
use crate::port::Embedder;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// OpenAI embeddings client.
#[derive(Debug)]
pub struct OpenAiEmbedder {
    /// HTTP client for API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Model identifier (e.g., "text-embedding-3-small").
    model: String,
    /// Base URL without trailing slash.
    base_url: String,
}

impl OpenAiEmbedder {
    /// Create a new client with explicit configuration.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(model: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "OPENAI_API_KEY",
            })
        })?;
        Ok(Self::new(api_key, model, base_url))
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct Response {
    data: Vec<Row>,
}

#[derive(Deserialize)]
struct Row {
    index: usize,
    embedding: Vec<f32>,
}

/// Order rows by `index` and check there is exactly one per input.
fn into_rows(response: Response, expected: usize) -> Result<Vec<Vec<f32>>> {
    let mut data = response.data;
    if data.len() != expected {
        return Err(EmbeddingError::RowCountMismatch {
            expected,
            actual: data.len(),
        }
        .into());
    }
    data.sort_by_key(|row| row.index);
    if data.iter().enumerate().any(|(i, row)| row.index != i) {
        return Err(EmbeddingError::Provider {
            provider: "openai",
            reason: "response indices do not cover the batch".into(),
        }
        .into());
    }
    Ok(data.into_iter().map(|row| row.embedding).collect())
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = Request {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        into_rows(response, texts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_model_and_batch() {
        let input = vec!["Fed cut".to_string(), "Fed hike".to_string()];
        let request = Request {
            model: "text-embedding-3-small",
            input: &input,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "text-embedding-3-small");
        assert_eq!(json["input"][1], "Fed hike");
    }

    #[test]
    fn rows_are_reordered_by_index() {
        let json = r#"{
            "object": "list",
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.0, 1.0]},
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
            ],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 4, "total_tokens": 4}
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        let rows = into_rows(response, 2).unwrap();
        assert_eq!(rows, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn short_response_is_rejected() {
        let json = r#"{"data": [{"index": 0, "embedding": [1.0]}]}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        let err = into_rows(response, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::Embedding(EmbeddingError::RowCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn duplicate_indices_are_rejected() {
        let json = r#"{"data": [
            {"index": 0, "embedding": [1.0]},
            {"index": 0, "embedding": [2.0]}
        ]}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert!(into_rows(response, 2).is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = OpenAiEmbedder::new("key", "m", "http://localhost:8080/");
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/embeddings");
    }
}
