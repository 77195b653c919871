//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Market identifier within a single venue - newtype for type safety.
///
/// Polymarket ids and Kalshi tickers share this type, but ids are only
/// ever compared against ids of the same venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarketId(String);

impl MarketId {
    /// Create a new `MarketId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the market ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MarketId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MarketId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One of the two exchanges being compared.
///
/// Polymarket is venue A (continuous, dollar-denominated stakes) and Kalshi
/// is venue B (whole contracts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Polymarket,
    Kalshi,
}

impl Venue {
    /// The other venue of the pair.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Polymarket => Self::Kalshi,
            Self::Kalshi => Self::Polymarket,
        }
    }

    /// Lowercase name used in logs and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polymarket => "polymarket",
            Self::Kalshi => "kalshi",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_id_new_and_as_str() {
        let id = MarketId::new("KXELECTION-24");
        assert_eq!(id.as_str(), "KXELECTION-24");
    }

    #[test]
    fn market_id_display() {
        let id = MarketId::from("516710");
        assert_eq!(format!("{}", id), "516710");
    }

    #[test]
    fn market_id_serializes_as_plain_string() {
        let id = MarketId::from("ELEC-X");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ELEC-X\"");
    }

    #[test]
    fn venue_other_flips() {
        assert_eq!(Venue::Kalshi.other(), Venue::Polymarket);
        assert_eq!(Venue::Polymarket.other(), Venue::Kalshi);
    }

    #[test]
    fn venue_deserializes_lowercase() {
        let venue: Venue = serde_json::from_str("\"kalshi\"").unwrap();
        assert_eq!(venue, Venue::Kalshi);
    }
}
