//! Hedge allocation configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::adapter::outbound::fee::DEFAULT_FEE_RATE;
use crate::domain::Venue;

/// `[allocation]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Total dollars split across both legs. Defaults to 10.
    pub stake: Decimal,

    /// Rate for the convexity fee model. Defaults to 0.07.
    pub fee_rate: Decimal,

    /// `convexity` or `none`.
    pub fee_model: FeeModelKind,

    /// Venue that only trades whole contracts. Defaults to Kalshi.
    pub discrete_venue: Venue,
}

/// Fee model selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeModelKind {
    #[default]
    Convexity,
    None,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            stake: dec!(10),
            fee_rate: DEFAULT_FEE_RATE,
            fee_model: FeeModelKind::default(),
            discrete_venue: Venue::Kalshi,
        }
    }
}
