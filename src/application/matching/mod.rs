//! Cross-venue market matching.
//!
//! Keyword pruning narrows the candidate space, then the semantic matcher
//! scores each keyword's shortlists with title embeddings and assigns pairs
//! under a run-wide one-to-one ledger.

pub mod assignment;
pub mod cache;
pub mod keyword;
pub mod ledger;
pub mod matcher;
pub mod service;
pub mod similarity;
pub mod tokenize;

pub use assignment::AssignmentPolicy;
pub use cache::EmbeddingCache;
pub use keyword::KeywordIndex;
pub use ledger::AssignmentLedger;
pub use matcher::{MarketTable, SemanticMatcher};
pub use service::{MatchReport, MatchingService, MatchingSettings};
pub use similarity::SimilarityMatrix;
