//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured components
//! from application configuration.
//!
//! # Submodules
//!
//! - [`allocation`] - Fee model and allocator construction
//! - [`embedding`] - Embedding provider construction
//! - [`matching`] - Matching service construction

pub mod allocation;
pub mod embedding;
pub mod matching;

#[cfg(test)]
mod tests;
