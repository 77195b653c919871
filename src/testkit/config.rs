//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::allocation::FeeModelKind;
use crate::infrastructure::config::settings::Config;

/// Defaults with fees switched off, so allocation tests see the raw edge.
pub fn fee_free() -> Config {
    let mut config = Config::default();
    config.allocation.fee_model = FeeModelKind::None;
    config
}

/// Small hashing dimension for fast matching tests.
pub fn small_hashing(dimension: usize) -> Config {
    let mut config = Config::default();
    config.embedding.dimension = dimension;
    config
}
