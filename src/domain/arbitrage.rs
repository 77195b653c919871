//! Cross-venue quotes and hedge allocations.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::Venue;

/// Binary contract outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("yes"),
            Self::No => f.write_str("no"),
        }
    }
}

/// Live ask prices for one matched pair, as probabilities in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub polymarket_yes: Decimal,
    pub polymarket_no: Decimal,
    pub kalshi_yes: Decimal,
    pub kalshi_no: Decimal,
}

impl Quote {
    /// Create a quote from decimal asks.
    #[must_use]
    pub const fn new(
        polymarket_yes: Decimal,
        polymarket_no: Decimal,
        kalshi_yes: Decimal,
        kalshi_no: Decimal,
    ) -> Self {
        Self {
            polymarket_yes,
            polymarket_no,
            kalshi_yes,
            kalshi_no,
        }
    }

    /// Create a quote from float asks as delivered by venue APIs.
    ///
    /// Non-finite values are rejected here so they never reach the
    /// allocator arithmetic.
    pub fn from_f64(
        polymarket_yes: f64,
        polymarket_no: f64,
        kalshi_yes: f64,
        kalshi_no: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            polymarket_yes: to_decimal("polymarket_yes", polymarket_yes)?,
            polymarket_no: to_decimal("polymarket_no", polymarket_no)?,
            kalshi_yes: to_decimal("kalshi_yes", kalshi_yes)?,
            kalshi_no: to_decimal("kalshi_no", kalshi_no)?,
        })
    }

    /// Ask price for one side on one venue.
    #[must_use]
    pub const fn ask(&self, venue: Venue, side: Side) -> Decimal {
        match (venue, side) {
            (Venue::Polymarket, Side::Yes) => self.polymarket_yes,
            (Venue::Polymarket, Side::No) => self.polymarket_no,
            (Venue::Kalshi, Side::Yes) => self.kalshi_yes,
            (Venue::Kalshi, Side::No) => self.kalshi_no,
        }
    }
}

fn to_decimal(field: &'static str, value: f64) -> Result<Decimal, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidPrice { field, value });
    }
    Decimal::try_from(value).map_err(|_| DomainError::InvalidPrice { field, value })
}

/// One side of a hedge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Venue the leg is bought on.
    pub venue: Venue,
    /// Ask price paid per contract.
    pub price: Decimal,
    /// Amount spent on this leg, excluding fees.
    pub stake: Decimal,
    /// Whole contracts bought, set only for the discrete venue's leg.
    pub contracts: Option<Decimal>,
}

impl Leg {
    /// Payout if this leg's side resolves true.
    ///
    /// Every contract pays out one dollar; a continuous leg holds
    /// `stake / price` contracts. `None` if that quotient overflows.
    #[must_use]
    pub fn payout(&self) -> Option<Decimal> {
        match self.contracts {
            Some(contracts) => Some(contracts),
            None => self.stake.checked_div(self.price),
        }
    }
}

/// A profitable hedge across the two venues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub yes: Leg,
    pub no: Leg,
    /// Estimated fee charged by the discrete venue.
    pub fee: Decimal,
    /// Both stakes plus the fee.
    pub total_investment: Decimal,
    pub profit_if_yes: Decimal,
    pub profit_if_no: Decimal,
    /// Worst-case profit as a percentage of `total_investment`.
    pub min_roi: Decimal,
}

impl Allocation {
    /// Venue holding the YES leg.
    #[must_use]
    pub fn yes_market(&self) -> Venue {
        self.yes.venue
    }

    /// Venue holding the NO leg.
    #[must_use]
    pub fn no_market(&self) -> Venue {
        self.no.venue
    }

    #[must_use]
    pub fn min_profit(&self) -> Decimal {
        self.profit_if_yes.min(self.profit_if_no)
    }

    #[must_use]
    pub fn max_profit(&self) -> Decimal {
        self.profit_if_yes.max(self.profit_if_no)
    }
}

/// Why a quote does not support a hedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoArbitrage {
    /// The cheaper YES and the cheaper NO are on the same venue.
    SameVenue,
    /// Cheapest YES plus cheapest NO costs at least one dollar.
    NoEdge,
    /// A selected ask is zero or negative, so contract counts are undefined.
    NonPositivePrice,
    /// The discrete leg rounds to zero contracts at this stake.
    RoundsToZero,
    /// Fees and contract rounding push a resolution into a loss.
    FeesExceedEdge,
    /// An intermediate amount does not fit in a decimal.
    Overflow,
}

impl fmt::Display for NoArbitrage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::SameVenue => "cheapest yes and no are on the same venue",
            Self::NoEdge => "yes + no asks cost at least $1",
            Self::NonPositivePrice => "an ask price is not positive",
            Self::RoundsToZero => "discrete leg rounds to zero contracts",
            Self::FeesExceedEdge => "fees and rounding erase the edge",
            Self::Overflow => "amounts exceed decimal range",
        };
        f.write_str(reason)
    }
}

/// Result of evaluating one quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Arbitrage {
    None { reason: NoArbitrage },
    Found(Allocation),
}

impl Arbitrage {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The allocation, if a hedge exists.
    #[must_use]
    pub fn allocation(&self) -> Option<&Allocation> {
        match self {
            Self::Found(allocation) => Some(allocation),
            Self::None { .. } => None,
        }
    }

    /// The rejection reason, if no hedge exists.
    #[must_use]
    pub fn reason(&self) -> Option<NoArbitrage> {
        match self {
            Self::None { reason } => Some(*reason),
            Self::Found(_) => None,
        }
    }
}

impl From<NoArbitrage> for Arbitrage {
    fn from(reason: NoArbitrage) -> Self {
        Self::None { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quote_ask_selects_venue_and_side() {
        let quote = Quote::new(dec!(0.60), dec!(0.55), dec!(0.40), dec!(0.70));
        assert_eq!(quote.ask(Venue::Polymarket, Side::No), dec!(0.55));
        assert_eq!(quote.ask(Venue::Kalshi, Side::Yes), dec!(0.40));
    }

    #[test]
    fn quote_from_f64_rejects_infinity() {
        let result = Quote::from_f64(0.5, 0.5, f64::INFINITY, 0.5);
        assert!(matches!(
            result,
            Err(DomainError::InvalidPrice {
                field: "kalshi_yes",
                ..
            })
        ));
    }

    #[test]
    fn quote_from_f64_converts_finite_values() {
        let quote = Quote::from_f64(0.25, 0.5, 0.75, 1.0).unwrap();
        assert_eq!(quote.polymarket_yes, dec!(0.25));
        assert_eq!(quote.kalshi_no, dec!(1));
    }

    #[test]
    fn leg_payout_uses_contracts_when_discrete() {
        let leg = Leg {
            venue: Venue::Kalshi,
            price: dec!(0.40),
            stake: dec!(4.40),
            contracts: Some(dec!(11)),
        };
        assert_eq!(leg.payout(), Some(dec!(11)));
    }

    #[test]
    fn leg_payout_divides_stake_when_continuous() {
        let leg = Leg {
            venue: Venue::Polymarket,
            price: dec!(0.50),
            stake: dec!(3),
            contracts: None,
        };
        assert_eq!(leg.payout(), Some(dec!(6)));
    }

    #[test]
    fn leg_payout_reports_overflow() {
        let leg = Leg {
            venue: Venue::Polymarket,
            price: dec!(0.01),
            stake: Decimal::MAX,
            contracts: None,
        };
        assert_eq!(leg.payout(), None);
    }

    #[test]
    fn arbitrage_none_serializes_reason() {
        let result = Arbitrage::from(NoArbitrage::SameVenue);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "none");
        assert_eq!(value["reason"], "same_venue");
        assert!(!result.is_found());
        assert_eq!(result.reason(), Some(NoArbitrage::SameVenue));
    }
}
