//! Handler for `hedgerow match`.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::MatchArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::listing;
use crate::application::matching::MatchReport;
use crate::domain::MatchedPair;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::matching::build_matching_service;

#[derive(Tabled)]
struct PairRow {
    #[tabled(rename = "Polymarket")]
    polymarket_id: String,
    #[tabled(rename = "Polymarket title")]
    polymarket_title: String,
    #[tabled(rename = "Kalshi")]
    kalshi_id: String,
    #[tabled(rename = "Kalshi title")]
    kalshi_title: String,
    #[tabled(rename = "Score")]
    score: String,
}

impl From<&MatchedPair> for PairRow {
    fn from(pair: &MatchedPair) -> Self {
        Self {
            polymarket_id: pair.polymarket_id.to_string(),
            polymarket_title: pair.polymarket_title.clone(),
            kalshi_id: pair.kalshi_id.to_string(),
            kalshi_title: pair.kalshi_title.clone(),
            score: format!("{:.3}", pair.similarity_score),
        }
    }
}

/// Execute `match`.
pub async fn execute(args: &MatchArgs, config: &Config) -> Result<()> {
    let polymarket = listing::load_polymarket(&args.polymarket)?;
    let kalshi = listing::load_kalshi(&args.kalshi)?;
    let service = build_matching_service(config)?;

    output::header(env!("CARGO_PKG_VERSION"));
    let pb = output::spinner(&format!(
        "Matching {} Polymarket and {} Kalshi markets",
        polymarket.len(),
        kalshi.len()
    ));
    let report = match service.run(&polymarket, &kalshi).await {
        Ok(report) => report,
        Err(e) => {
            output::spinner_fail(&pb, "Matching failed");
            return Err(e);
        }
    };
    output::spinner_success(&pb, &format!("Matched {} pairs", report.pairs.len()));

    if let Some(path) = &args.output {
        listing::write_pairs(path, &report.pairs)?;
    }

    if output::is_json() {
        return output::json(&json!({
            "command": "match",
            "report": report,
            "output": args.output,
        }));
    }

    render(&report);
    if let Some(path) = &args.output {
        output::success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

fn render(report: &MatchReport) {
    output::section("Matched pairs");
    if report.pairs.is_empty() {
        output::note("(none)");
    } else {
        output::table(report.pairs.iter().map(PairRow::from));
    }

    output::section("Keywords");
    output::field("Indexed", report.keywords_total);
    output::field("Matched", report.keywords_matched);
    output::field("Skipped", report.keywords_skipped);
    output::field("Failed", report.keywords_failed);

    if report.keywords_failed > 0 {
        output::warning(&format!(
            "{} keywords failed to embed; their candidates were not compared",
            report.keywords_failed
        ));
    }
    if report.unreachable_polymarket + report.unreachable_kalshi > 0 {
        output::section("Coverage");
        output::field("Polymarket", format!("{} unreachable", report.unreachable_polymarket));
        output::field("Kalshi", format!("{} unreachable", report.unreachable_kalshi));
        output::note("These markets share no indexed keyword with the other venue.");
    }
}
