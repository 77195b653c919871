//! Fee models for the discrete venue.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::port::FeeModel;

/// Default Kalshi taker fee rate.
pub const DEFAULT_FEE_RATE: Decimal = dec!(0.07);

/// Taker fee proportional to `contracts * price * (1 - price)`.
///
/// The charge peaks at a 50c price and vanishes at the extremes. Venue fee
/// schedules round this up to the next cent per order; the estimate here is
/// left unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvexityFee {
    rate: Decimal,
}

impl ConvexityFee {
    #[must_use]
    pub const fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }
}

impl Default for ConvexityFee {
    fn default() -> Self {
        Self::new(DEFAULT_FEE_RATE)
    }
}

impl FeeModel for ConvexityFee {
    fn name(&self) -> &'static str {
        "convexity"
    }

    fn estimate(&self, contracts: Decimal, price: Decimal) -> Option<Decimal> {
        self.rate
            .checked_mul(contracts)?
            .checked_mul(price)?
            .checked_mul(Decimal::ONE.checked_sub(price)?)
    }
}

/// Zero fee, for venues or accounts without taker fees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFee;

impl FeeModel for NoFee {
    fn name(&self) -> &'static str {
        "none"
    }

    fn estimate(&self, _contracts: Decimal, _price: Decimal) -> Option<Decimal> {
        Some(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convexity_fee_matches_formula() {
        let fee = ConvexityFee::default();
        assert_eq!(fee.estimate(dec!(100), dec!(0.5)), Some(dec!(1.75)));
        assert_eq!(fee.estimate(dec!(10), dec!(0.49)), Some(dec!(0.17493)));
    }

    #[test]
    fn convexity_fee_vanishes_at_extremes() {
        let fee = ConvexityFee::default();
        assert_eq!(fee.estimate(dec!(50), dec!(1)), Some(Decimal::ZERO));
        assert_eq!(fee.estimate(dec!(50), dec!(0)), Some(Decimal::ZERO));
    }

    #[test]
    fn fee_is_symmetric_in_price() {
        let fee = ConvexityFee::new(dec!(0.035));
        assert_eq!(
            fee.estimate(dec!(7), dec!(0.2)),
            fee.estimate(dec!(7), dec!(0.8))
        );
    }

    #[test]
    fn convexity_fee_reports_overflow() {
        let fee = ConvexityFee::new(dec!(1000));
        assert_eq!(fee.estimate(Decimal::MAX, dec!(0.5)), None);
    }

    #[test]
    fn no_fee_is_zero() {
        assert_eq!(NoFee.estimate(dec!(1000), dec!(0.5)), Some(Decimal::ZERO));
    }
}
