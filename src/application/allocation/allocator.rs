//! Two-venue hedge allocator.
//!
//! Given one quote per side per venue, buys the cheaper YES and the cheaper
//! NO on opposite venues so that either resolution pays out more than the
//! total outlay. The discrete venue only sells whole contracts, so its leg
//! is rounded and the other leg rescaled to keep the hedge balanced.
//!
//! All arithmetic is [`Decimal`]; ratios are formed multiply-then-divide.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::{Allocation, Arbitrage, Leg, NoArbitrage, Quote, Side, Venue};
use crate::port::FeeModel;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Sizes hedges for a fixed total stake.
pub struct Allocator {
    stake: Decimal,
    discrete_venue: Venue,
    fee: Arc<dyn FeeModel>,
}

impl Allocator {
    /// Create an allocator spending `stake` across both legs.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveStake`] if `stake <= 0`.
    pub fn new(
        stake: Decimal,
        discrete_venue: Venue,
        fee: Arc<dyn FeeModel>,
    ) -> Result<Self, DomainError> {
        if stake <= Decimal::ZERO {
            return Err(DomainError::NonPositiveStake { stake });
        }
        Ok(Self {
            stake,
            discrete_venue,
            fee,
        })
    }

    #[must_use]
    pub fn stake(&self) -> Decimal {
        self.stake
    }

    #[must_use]
    pub fn discrete_venue(&self) -> Venue {
        self.discrete_venue
    }

    #[must_use]
    pub fn fee_model(&self) -> &dyn FeeModel {
        self.fee.as_ref()
    }

    /// Evaluate one quote.
    ///
    /// A quote without a profitable hedge is a normal outcome and comes back
    /// as [`Arbitrage::None`] with the first gate it failed.
    #[must_use]
    pub fn allocate(&self, quote: &Quote) -> Arbitrage {
        match self.try_allocate(quote) {
            Ok(allocation) => Arbitrage::Found(allocation),
            Err(reason) => {
                debug!(%reason, ?quote, "No arbitrage");
                reason.into()
            }
        }
    }

    fn try_allocate(&self, quote: &Quote) -> Result<Allocation, NoArbitrage> {
        let (yes_venue, no_venue) = select_venues(quote, self.discrete_venue);
        if yes_venue == no_venue {
            return Err(NoArbitrage::SameVenue);
        }

        let yes_price = quote.ask(yes_venue, Side::Yes);
        let no_price = quote.ask(no_venue, Side::No);
        if yes_price <= Decimal::ZERO || no_price <= Decimal::ZERO {
            return Err(NoArbitrage::NonPositivePrice);
        }
        if yes_price + no_price >= Decimal::ONE {
            return Err(NoArbitrage::NoEdge);
        }

        let (yes_stake, no_stake) =
            split_stake(self.stake, yes_price, no_price).ok_or(NoArbitrage::Overflow)?;
        let yes = Leg {
            venue: yes_venue,
            price: yes_price,
            stake: yes_stake,
            contracts: None,
        };
        let no = Leg {
            venue: no_venue,
            price: no_price,
            stake: no_stake,
            contracts: None,
        };

        let (yes, no) = round_discrete_leg(yes, no, self.discrete_venue)?;

        let discrete = if yes.venue == self.discrete_venue {
            &yes
        } else {
            &no
        };
        let contracts = discrete.contracts.unwrap_or_default();
        let fee = self
            .fee
            .estimate(contracts, discrete.price)
            .ok_or(NoArbitrage::Overflow)?;

        let total_investment = yes
            .stake
            .checked_add(no.stake)
            .and_then(|sum| sum.checked_add(fee))
            .ok_or(NoArbitrage::Overflow)?;
        let profit_if_yes = yes
            .payout()
            .and_then(|payout| payout.checked_sub(total_investment))
            .ok_or(NoArbitrage::Overflow)?;
        let profit_if_no = no
            .payout()
            .and_then(|payout| payout.checked_sub(total_investment))
            .ok_or(NoArbitrage::Overflow)?;
        let min_profit = profit_if_yes.min(profit_if_no);
        if min_profit < Decimal::ZERO {
            return Err(NoArbitrage::FeesExceedEdge);
        }
        let min_roi = min_profit
            .checked_mul(HUNDRED)
            .and_then(|scaled| scaled.checked_div(total_investment))
            .ok_or(NoArbitrage::Overflow)?;

        Ok(Allocation {
            yes,
            no,
            fee,
            total_investment,
            profit_if_yes,
            profit_if_no,
            min_roi,
        })
    }
}

/// Pick the venue for each side of the hedge.
///
/// Each side goes to its cheaper venue; a side whose two asks are equal
/// goes to the discrete venue. Returning the same venue twice means no
/// cross-venue hedge exists.
#[must_use]
pub fn select_venues(quote: &Quote, discrete_venue: Venue) -> (Venue, Venue) {
    let yes = cheaper(quote.polymarket_yes, quote.kalshi_yes).unwrap_or(discrete_venue);
    let no = cheaper(quote.polymarket_no, quote.kalshi_no).unwrap_or(discrete_venue);
    (yes, no)
}

fn cheaper(polymarket: Decimal, kalshi: Decimal) -> Option<Venue> {
    match polymarket.cmp(&kalshi) {
        std::cmp::Ordering::Less => Some(Venue::Polymarket),
        std::cmp::Ordering::Greater => Some(Venue::Kalshi),
        std::cmp::Ordering::Equal => None,
    }
}

/// Split `stake` across the legs in proportion to their prices.
///
/// Buying the same number of contracts on both sides is what makes the
/// payouts equal, and that count is `stake / (yes_price + no_price)`.
/// Returns `None` if an intermediate amount overflows.
#[must_use]
pub fn split_stake(
    stake: Decimal,
    yes_price: Decimal,
    no_price: Decimal,
) -> Option<(Decimal, Decimal)> {
    let total = yes_price.checked_add(no_price)?;
    let yes = stake.checked_mul(yes_price)?.checked_div(total)?;
    let no = stake.checked_mul(no_price)?.checked_div(total)?;
    Some((yes, no))
}

/// Round the discrete venue's leg to whole contracts.
///
/// The contract count is rounded half-to-even, the discrete stake becomes
/// `contracts * price` and the other leg is scaled by the same ratio.
/// Legs whose discrete count is already whole come back with unchanged
/// stakes.
///
/// # Errors
///
/// Returns [`NoArbitrage::RoundsToZero`] when the leg rounds to zero
/// contracts, and [`NoArbitrage::Overflow`] when a rescaled amount does not
/// fit in a [`Decimal`].
pub fn round_discrete_leg(
    yes: Leg,
    no: Leg,
    discrete_venue: Venue,
) -> Result<(Leg, Leg), NoArbitrage> {
    let discrete_is_yes = yes.venue == discrete_venue;
    let (mut discrete, mut other) = if discrete_is_yes { (yes, no) } else { (no, yes) };

    let raw = discrete
        .stake
        .checked_div(discrete.price)
        .ok_or(NoArbitrage::Overflow)?;
    let contracts = raw.round();
    if contracts.is_zero() {
        return Err(NoArbitrage::RoundsToZero);
    }

    if contracts != raw {
        discrete.stake = contracts
            .checked_mul(discrete.price)
            .ok_or(NoArbitrage::Overflow)?;
        other.stake = other
            .stake
            .checked_mul(contracts)
            .and_then(|scaled| scaled.checked_div(raw))
            .ok_or(NoArbitrage::Overflow)?;
    }
    discrete.contracts = Some(contracts);
    other.contracts = None;

    Ok(if discrete_is_yes {
        (discrete, other)
    } else {
        (other, discrete)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::fee::{ConvexityFee, NoFee};
    use rust_decimal_macros::dec;

    fn allocator(stake: Decimal, fee: Arc<dyn FeeModel>) -> Allocator {
        Allocator::new(stake, Venue::Kalshi, fee).unwrap()
    }

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < dec!(0.000001)
    }

    /// Kalshi YES 0.40 + Polymarket NO 0.55.
    fn edge_quote() -> Quote {
        Quote::new(dec!(0.60), dec!(0.55), dec!(0.40), dec!(0.70))
    }

    #[test]
    fn rejects_non_positive_stake() {
        assert!(matches!(
            Allocator::new(dec!(0), Venue::Kalshi, Arc::new(NoFee)),
            Err(DomainError::NonPositiveStake { .. })
        ));
        assert!(Allocator::new(dec!(-5), Venue::Kalshi, Arc::new(NoFee)).is_err());
    }

    #[test]
    fn finds_hedge_without_fees() {
        let result = allocator(dec!(10), Arc::new(NoFee)).allocate(&edge_quote());
        let allocation = result.allocation().unwrap();

        assert_eq!(allocation.yes_market(), Venue::Kalshi);
        assert_eq!(allocation.no_market(), Venue::Polymarket);
        assert_eq!(allocation.yes.contracts, Some(dec!(11)));
        assert_eq!(allocation.yes.stake, dec!(4.40));
        assert!(close(allocation.no.stake, dec!(6.05)));
        assert!(close(allocation.total_investment, dec!(10.45)));
        assert!(close(allocation.profit_if_yes, dec!(0.55)));
        assert!(close(allocation.profit_if_no, dec!(0.55)));
        assert!(allocation.min_roi > Decimal::ZERO);
        assert!(close(allocation.min_roi.round_dp(2), dec!(5.26)));
    }

    #[test]
    fn fee_is_charged_on_discrete_leg() {
        let result = allocator(dec!(10), Arc::new(ConvexityFee::default())).allocate(&edge_quote());
        let allocation = result.allocation().unwrap();

        // 0.07 * 11 * 0.40 * 0.60
        assert_eq!(allocation.fee, dec!(0.1848));
        assert!(close(allocation.total_investment, dec!(10.6348)));
        assert!(allocation.min_profit() > Decimal::ZERO);
    }

    #[test]
    fn fee_can_erase_a_thin_edge() {
        let quote = Quote::new(dec!(0.55), dec!(0.50), dec!(0.49), dec!(0.60));

        let free = allocator(dec!(10), Arc::new(NoFee)).allocate(&quote);
        let charged = allocator(dec!(10), Arc::new(ConvexityFee::default())).allocate(&quote);

        assert!(free.is_found());
        assert_eq!(charged.reason(), Some(NoArbitrage::FeesExceedEdge));
    }

    #[test]
    fn same_venue_is_rejected() {
        let quote = Quote::new(dec!(0.50), dec!(0.60), dec!(0.30), dec!(0.40));
        let result = allocator(dec!(10), Arc::new(NoFee)).allocate(&quote);
        assert_eq!(result.reason(), Some(NoArbitrage::SameVenue));
    }

    #[test]
    fn no_edge_at_one_dollar() {
        let quote = Quote::new(dec!(0.50), dec!(0.55), dec!(0.55), dec!(0.50));
        let result = allocator(dec!(10), Arc::new(NoFee)).allocate(&quote);
        assert_eq!(result.reason(), Some(NoArbitrage::NoEdge));
    }

    #[test]
    fn zero_price_is_rejected_before_division() {
        let quote = Quote::new(dec!(0.60), dec!(0.55), dec!(0), dec!(0.70));
        let result = allocator(dec!(10), Arc::new(NoFee)).allocate(&quote);
        assert_eq!(result.reason(), Some(NoArbitrage::NonPositivePrice));
    }

    #[test]
    fn tiny_stake_rounds_to_zero() {
        let result = allocator(dec!(0.1), Arc::new(NoFee)).allocate(&edge_quote());
        assert_eq!(result.reason(), Some(NoArbitrage::RoundsToZero));
    }

    #[test]
    fn discrete_leg_can_be_the_no_side() {
        // Polymarket YES 0.40 + Kalshi NO 0.55.
        let quote = Quote::new(dec!(0.40), dec!(0.70), dec!(0.60), dec!(0.55));
        let allocation = allocator(dec!(10), Arc::new(NoFee))
            .allocate(&quote)
            .allocation()
            .cloned()
            .unwrap();

        assert_eq!(allocation.yes.venue, Venue::Polymarket);
        assert_eq!(allocation.yes.contracts, None);
        assert_eq!(allocation.no.venue, Venue::Kalshi);
        // raw = 5.789.../0.55 = 10.526..., rounds to 11
        assert_eq!(allocation.no.contracts, Some(dec!(11)));
        assert_eq!(allocation.no.stake, dec!(6.05));
    }

    #[test]
    fn whole_contract_stake_is_exact() {
        let result = allocator(dec!(9.5), Arc::new(NoFee)).allocate(&edge_quote());
        let allocation = result.allocation().unwrap();

        assert_eq!(allocation.yes.contracts, Some(dec!(10)));
        assert_eq!(allocation.yes.stake, dec!(4));
        assert_eq!(allocation.no.stake, dec!(5.5));
        assert_eq!(allocation.profit_if_yes, dec!(0.5));
        assert_eq!(allocation.profit_if_no, dec!(0.5));
    }

    #[test]
    fn rounding_is_idempotent_on_whole_counts() {
        let yes = Leg {
            venue: Venue::Kalshi,
            price: dec!(0.4),
            stake: dec!(4),
            contracts: None,
        };
        let no = Leg {
            venue: Venue::Polymarket,
            price: dec!(0.55),
            stake: dec!(5.5),
            contracts: None,
        };

        let (yes, no) = round_discrete_leg(yes, no, Venue::Kalshi).unwrap();
        assert_eq!(yes.contracts, Some(dec!(10)));
        assert_eq!(yes.stake, dec!(4));
        assert_eq!(no.stake, dec!(5.5));

        let (again_yes, again_no) = round_discrete_leg(yes.clone(), no.clone(), Venue::Kalshi).unwrap();
        assert_eq!((again_yes, again_no), (yes, no));
    }

    #[test]
    fn rounding_uses_half_to_even() {
        let leg = |stake| Leg {
            venue: Venue::Kalshi,
            price: dec!(0.5),
            stake,
            contracts: None,
        };
        let other = Leg {
            venue: Venue::Polymarket,
            price: dec!(0.4),
            stake: dec!(1),
            contracts: None,
        };

        // 1.25 / 0.5 = 2.5 -> 2, 1.75 / 0.5 = 3.5 -> 4
        let (down, _) = round_discrete_leg(leg(dec!(1.25)), other.clone(), Venue::Kalshi).unwrap();
        let (up, _) = round_discrete_leg(leg(dec!(1.75)), other, Venue::Kalshi).unwrap();
        assert_eq!(down.contracts, Some(dec!(2)));
        assert_eq!(up.contracts, Some(dec!(4)));
    }

    #[test]
    fn ties_go_to_the_discrete_venue() {
        // YES tied, NO cheaper on Polymarket: YES goes to Kalshi.
        let quote = Quote::new(dec!(0.40), dec!(0.50), dec!(0.40), dec!(0.55));
        assert_eq!(
            select_venues(&quote, Venue::Kalshi),
            (Venue::Kalshi, Venue::Polymarket)
        );

        // NO tied, YES cheaper on Polymarket: NO goes to Kalshi.
        let quote = Quote::new(dec!(0.40), dec!(0.50), dec!(0.45), dec!(0.50));
        assert_eq!(
            select_venues(&quote, Venue::Kalshi),
            (Venue::Polymarket, Venue::Kalshi)
        );

        // Both tied: both sides land on the discrete venue.
        let quote = Quote::new(dec!(0.45), dec!(0.50), dec!(0.45), dec!(0.50));
        assert_eq!(
            select_venues(&quote, Venue::Kalshi),
            (Venue::Kalshi, Venue::Kalshi)
        );
        assert_eq!(
            select_venues(&quote, Venue::Polymarket),
            (Venue::Polymarket, Venue::Polymarket)
        );
    }

    #[test]
    fn tie_beside_a_discrete_cheaper_side_is_same_venue() {
        // YES tied at 0.40, NO cheaper on Kalshi: both land on Kalshi.
        let quote = Quote::new(dec!(0.40), dec!(0.55), dec!(0.40), dec!(0.50));
        let result = allocator(dec!(10), Arc::new(NoFee)).allocate(&quote);
        assert_eq!(result.reason(), Some(NoArbitrage::SameVenue));

        let both_tied = Quote::new(dec!(0.45), dec!(0.50), dec!(0.45), dec!(0.50));
        let result = allocator(dec!(10), Arc::new(NoFee)).allocate(&both_tied);
        assert_eq!(result.reason(), Some(NoArbitrage::SameVenue));
    }

    #[test]
    fn huge_stake_overflows_without_panicking() {
        let stake = Decimal::from_str_exact("70000000000000000000000000000").unwrap();
        let result = allocator(stake, Arc::new(NoFee)).allocate(&edge_quote());
        assert_eq!(result.reason(), Some(NoArbitrage::Overflow));

        let result = allocator(Decimal::MAX, Arc::new(ConvexityFee::default()))
            .allocate(&edge_quote());
        assert_eq!(result.reason(), Some(NoArbitrage::Overflow));
    }

    #[test]
    fn split_is_proportional_to_price() {
        let (yes, no) = split_stake(dec!(10), dec!(0.40), dec!(0.55)).unwrap();
        assert!(close(yes + no, dec!(10)));
        assert!(close(yes / dec!(0.40), no / dec!(0.55)));
    }

    #[test]
    fn profits_are_non_negative_over_a_price_grid() {
        let allocator = allocator(dec!(100), Arc::new(ConvexityFee::default()));
        let prices: Vec<Decimal> = (1..20).map(|i| Decimal::new(i * 5, 2)).collect();
        for &yes in &prices {
            for &no in &prices {
                let quote = Quote::new(dec!(0.99), no, yes, dec!(0.99));
                if let Some(allocation) = allocator.allocate(&quote).allocation() {
                    assert!(allocation.profit_if_yes >= Decimal::ZERO);
                    assert!(allocation.profit_if_no >= Decimal::ZERO);
                    assert_ne!(allocation.yes.venue, allocation.no.venue);
                }
            }
        }
    }
}
