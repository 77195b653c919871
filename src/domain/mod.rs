//! Venue-agnostic domain types.

pub mod arbitrage;
pub mod error;
pub mod id;
pub mod keyword;
pub mod market;
pub mod pair;

pub use arbitrage::{Allocation, Arbitrage, Leg, NoArbitrage, Quote, Side};
pub use id::{MarketId, Venue};
pub use keyword::KeywordEntry;
pub use market::Market;
pub use pair::MatchedPair;
