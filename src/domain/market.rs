//! Market records as seen by the matching core.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{MarketId, Venue};

/// A single open market on one venue.
///
/// The collaborator that fetches listings has already filtered out inactive
/// and closed markets and merged any subtitle fields into `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    id: MarketId,
    title: String,
}

impl Market {
    /// Create a new market record.
    pub fn new(id: impl Into<MarketId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Venue-local market identifier.
    #[must_use]
    pub fn id(&self) -> &MarketId {
        &self.id
    }

    /// Display title used for keyword pruning and embedding.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Reject a venue table that repeats a market id.
///
/// The assignment ledger keys on ids, so a repeated id would let one listing
/// silently shadow another.
pub fn ensure_unique_ids(venue: Venue, markets: &[Market]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(markets.len());
    for market in markets {
        if !seen.insert(market.id()) {
            return Err(DomainError::DuplicateMarketId {
                venue,
                id: market.id().clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_fields() {
        let market = Market::new("ELEC-X", "X Election Winner");
        assert_eq!(market.id().as_str(), "ELEC-X");
        assert_eq!(market.title(), "X Election Winner");
    }

    #[test]
    fn unique_ids_pass() {
        let markets = vec![Market::new("1", "a"), Market::new("2", "b")];
        assert!(ensure_unique_ids(Venue::Polymarket, &markets).is_ok());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let markets = vec![Market::new("1", "a"), Market::new("1", "b")];
        let err = ensure_unique_ids(Venue::Kalshi, &markets).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateMarketId { venue: Venue::Kalshi, ref id } if id.as_str() == "1"
        ));
    }
}
