//! Hedge sizing for matched pairs.

pub mod allocator;
pub mod scan;

pub use allocator::{round_discrete_leg, select_venues, split_stake, Allocator};
pub use scan::{scan, QuoteBook, ScanEntry, ScanReport};
