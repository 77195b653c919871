//! Domain validation errors for core domain types.
//!
//! These errors are returned when a domain invariant is violated at a
//! construction boundary. A missing arbitrage is not one of them: that is a
//! regular [`Arbitrage::None`](super::arbitrage::Arbitrage::None) outcome.
//!
//! # Examples
//!
//! ```
//! use hedgerow::domain::arbitrage::Quote;
//! use hedgerow::domain::error::DomainError;
//!
//! let result = Quote::from_f64(0.40, f64::NAN, 0.45, 0.55);
//! assert!(matches!(result, Err(DomainError::InvalidPrice { .. })));
//! ```

use thiserror::Error;

use super::id::{MarketId, Venue};

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Total stake must be positive.
    #[error("stake must be positive, got {stake}")]
    NonPositiveStake {
        /// The invalid stake that was provided.
        stake: rust_decimal::Decimal,
    },

    /// Ask prices must be finite numbers.
    #[error("invalid {field} price: {value}")]
    InvalidPrice {
        /// Which quote field carried the value.
        field: &'static str,
        /// The raw value as received.
        value: f64,
    },

    /// Market ids must be unique within one venue.
    #[error("duplicate {venue} market id: {id}")]
    DuplicateMarketId {
        /// Venue whose listing contained the duplicate.
        venue: Venue,
        /// The repeated id.
        id: MarketId,
    },
}
