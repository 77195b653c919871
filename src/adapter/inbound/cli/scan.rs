//! Handler for `hedgerow scan`.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::ScanArgs;
use crate::adapter::inbound::cli::quote::render_allocation;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::listing;
use crate::application::allocation::{scan, ScanEntry};
use crate::domain::Arbitrage;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::allocation::build_allocator;

#[derive(Tabled)]
struct ScanRow {
    #[tabled(rename = "Polymarket")]
    polymarket_id: String,
    #[tabled(rename = "Kalshi")]
    kalshi_id: String,
    #[tabled(rename = "YES")]
    yes: String,
    #[tabled(rename = "NO")]
    no: String,
    #[tabled(rename = "Min ROI")]
    roi: String,
}

impl From<&ScanEntry> for ScanRow {
    fn from(entry: &ScanEntry) -> Self {
        let (yes, no, roi) = match &entry.result {
            Arbitrage::Found(a) => (
                format!("{} @ {}", a.yes.venue, a.yes.price),
                format!("{} @ {}", a.no.venue, a.no.price),
                output::percent(a.min_roi),
            ),
            Arbitrage::None { reason } => ("-".into(), "-".into(), reason.to_string()),
        };
        Self {
            polymarket_id: entry.pair.polymarket_id.to_string(),
            kalshi_id: entry.pair.kalshi_id.to_string(),
            yes,
            no,
            roi,
        }
    }
}

/// Execute `scan`.
pub fn execute(args: &ScanArgs, config: &Config) -> Result<()> {
    let allocator = build_allocator(config, args.stake)?;
    let pairs = listing::load_pairs(&args.pairs)?;
    let quotes = listing::load_quotes(&args.quotes)?;

    let report = scan(&allocator, &pairs, &quotes);

    if output::is_json() {
        return output::json(&json!({
            "command": "scan",
            "stake": allocator.stake(),
            "report": report,
        }));
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Pairs");
    if report.entries.is_empty() {
        output::note("(no quoted pairs)");
    } else {
        output::table(report.entries.iter().map(ScanRow::from));
    }
    output::field("Hedges", report.found().count());
    if !report.unquoted.is_empty() {
        output::warning(&format!("{} pairs had no quote", report.unquoted.len()));
    }

    if let Some(best) = report.best() {
        if let Some(allocation) = best.result.allocation() {
            output::section(&format!(
                "Best: {} / {}",
                best.pair.polymarket_title, best.pair.kalshi_title
            ));
            render_allocation(allocation);
        }
    }
    Ok(())
}
