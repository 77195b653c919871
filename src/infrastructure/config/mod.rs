//! Infrastructure configuration modules.

pub mod allocation;
pub mod embedding;
pub mod logging;
pub mod matching;
pub mod settings;
