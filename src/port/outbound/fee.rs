//! Fee estimation port for the arbitrage allocator.

use rust_decimal::Decimal;

/// Estimates the trading fee charged on the discrete venue's leg.
///
/// Fee schedules differ between venues and change over time, so the
/// allocator takes the estimate from this trait instead of a constant.
pub trait FeeModel: Send + Sync {
    /// Return the model name for logging.
    fn name(&self) -> &'static str;

    /// Estimated fee in dollars for buying `contracts` at `price`.
    ///
    /// Returns `None` if the fee does not fit in a [`Decimal`].
    fn estimate(&self, contracts: Decimal, price: Decimal) -> Option<Decimal>;
}
