//! Matching service factory.

use crate::application::matching::MatchingService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use super::embedding::build_embedder;

/// Build a matching service over the configured embedding provider.
///
/// # Errors
///
/// Returns an error if the embedding provider cannot be built.
pub fn build_matching_service(config: &Config) -> Result<MatchingService> {
    let embedder = build_embedder(config)?;
    Ok(MatchingService::new(embedder, config.matching.settings()))
}
