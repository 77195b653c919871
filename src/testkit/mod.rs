//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`embedder`] - Deterministic [`Embedder`](crate::port::Embedder)
//!   implementations: `ConstantEmbedder`, `ScriptedEmbedder`, `FailingEmbedder`.
//! - [`domain`] - Builders for domain primitives: markets, pairs, quotes.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod embedder;
