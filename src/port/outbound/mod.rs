//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod embedder;
pub mod fee;
