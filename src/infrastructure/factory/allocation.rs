//! Allocator factory.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::adapter::outbound::fee::{ConvexityFee, NoFee};
use crate::application::allocation::Allocator;
use crate::error::Result;
use crate::infrastructure::config::allocation::FeeModelKind;
use crate::infrastructure::config::settings::Config;
use crate::port::FeeModel;

/// Build the configured fee model.
#[must_use]
pub fn build_fee_model(config: &Config) -> Arc<dyn FeeModel> {
    match config.allocation.fee_model {
        FeeModelKind::Convexity => Arc::new(ConvexityFee::new(config.allocation.fee_rate)),
        FeeModelKind::None => Arc::new(NoFee),
    }
}

/// Build an allocator, optionally overriding the configured stake.
///
/// # Errors
///
/// Returns an error if the effective stake is not positive.
pub fn build_allocator(config: &Config, stake: Option<Decimal>) -> Result<Allocator> {
    let stake = stake.unwrap_or(config.allocation.stake);
    Ok(Allocator::new(
        stake,
        config.allocation.discrete_venue,
        build_fee_model(config),
    )?)
}
