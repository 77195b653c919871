//! Outbound adapters (driven side).

pub mod embedding;
pub mod fee;
pub mod listing;
