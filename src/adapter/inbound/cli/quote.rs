//! Handler for `hedgerow quote`.

use serde_json::json;

use crate::adapter::inbound::cli::command::QuoteArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{Allocation, Arbitrage, Leg, Quote};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::allocation::build_allocator;

/// Execute `quote`.
pub fn execute(args: &QuoteArgs, config: &Config) -> Result<()> {
    let allocator = build_allocator(config, args.stake)?;
    let quote = Quote::new(args.poly_yes, args.poly_no, args.kalshi_yes, args.kalshi_no);
    let result = allocator.allocate(&quote);

    if output::is_json() {
        return output::json(&json!({
            "command": "quote",
            "stake": allocator.stake(),
            "fee_model": allocator.fee_model().name(),
            "quote": quote,
            "result": result,
        }));
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Stake", output::money(allocator.stake()));
    output::field("Fee model", allocator.fee_model().name());
    match &result {
        Arbitrage::Found(allocation) => render_allocation(allocation),
        Arbitrage::None { reason } => {
            output::section("No arbitrage");
            output::field("Reason", reason);
        }
    }
    Ok(())
}

/// Print the legs and outcomes of a hedge.
pub fn render_allocation(allocation: &Allocation) {
    output::section("Hedge");
    output::field("Buy YES", describe(&allocation.yes));
    output::field("Buy NO", describe(&allocation.no));
    output::field("Fee", output::money(allocation.fee));
    output::field("Total", output::money(allocation.total_investment));

    output::section("Outcomes");
    output::field(
        "If YES",
        output::signed(allocation.profit_if_yes, output::money(allocation.profit_if_yes)),
    );
    output::field(
        "If NO",
        output::signed(allocation.profit_if_no, output::money(allocation.profit_if_no)),
    );
    output::field(
        "Min ROI",
        output::signed(allocation.min_roi, output::percent(allocation.min_roi)),
    );
}

fn describe(leg: &Leg) -> String {
    let size = match leg.contracts {
        Some(contracts) => format!("{contracts} contracts"),
        None => output::money(leg.stake),
    };
    format!("{} @ {} ({size})", leg.venue, leg.price)
}
