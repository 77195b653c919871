//! Hedgerow - cross-venue prediction market matching and hedge allocation.
//!
//! Pairs Polymarket and Kalshi listings that describe the same event, then
//! sizes riskless YES/NO hedges across the two venues.
//!
//! # Architecture
//!
//! - **`domain`** - Markets, keywords, matched pairs, quotes and allocations
//! - **`port`** - Traits for embedding providers and fee models
//! - **`application::matching`** - Keyword pruning, embedding cache and
//!   pair assignment
//! - **`application::allocation`** - Hedge sizing and pair scanning
//! - **`adapter`** - CLI, listing files, embedding providers, fee models
//! - **`infrastructure`** - TOML configuration and component factories
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hedgerow::adapter::outbound::embedding::HashingEmbedder;
//! use hedgerow::application::matching::{MatchingService, MatchingSettings};
//! use hedgerow::domain::Market;
//!
//! # async fn run() -> hedgerow::error::Result<()> {
//! let service = MatchingService::new(
//!     Arc::new(HashingEmbedder::default()),
//!     MatchingSettings::default(),
//! );
//! let report = service
//!     .run(
//!         &[Market::new("1", "Will X win the election?")],
//!         &[Market::new("ELEC-X", "X Election Winner")],
//!     )
//!     .await?;
//! println!("{} pairs", report.pairs.len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
