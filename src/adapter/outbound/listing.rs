//! Venue listing files.
//!
//! Listings arrive as JSON exported from each venue's market endpoint,
//! either as a bare array or wrapped in `{"markets": [...]}`. They are
//! filtered to tradable markets and reduced to [`Market`] rows. A null or
//! missing title reads as empty so one bad row does not sink the file.
//! Matched pairs and quote tables use the same JSON layer.

use std::fs;
use std::path::Path;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::info;

use crate::application::allocation::QuoteBook;
use crate::domain::market::ensure_unique_ids;
use crate::domain::{Market, MarketId, MatchedPair, Quote, Venue};
use crate::error::Result;

/// One Polymarket market as listed by the markets endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PolymarketListing {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub closed: bool,
}

impl PolymarketListing {
    /// Whether the market is still tradable.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active && !self.closed
    }

    #[must_use]
    pub fn into_market(self) -> Market {
        Market::new(self.id, self.question)
    }
}

/// One Kalshi market as listed by the markets endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct KalshiListing {
    pub ticker: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub yes_sub_title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl KalshiListing {
    /// Whether the market is still tradable. A missing status counts as open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status
            .as_deref()
            .map_or(true, |s| s.eq_ignore_ascii_case("open") || s.eq_ignore_ascii_case("active"))
    }

    /// Title used for matching.
    ///
    /// Kalshi splits a contract's wording between `title` and a subtitle.
    /// A blank or `"::"` subtitle falls back to `yes_sub_title`; a subtitle
    /// already contained in the title adds nothing.
    #[must_use]
    pub fn display_title(&self) -> String {
        match self.subtitle.as_deref().map(str::trim) {
            None | Some("" | "::") => {
                let extra = self.yes_sub_title.as_deref().unwrap_or_default();
                format!("{} {}", self.title, extra).trim().to_string()
            }
            Some(subtitle) if self.title.to_lowercase().contains(&subtitle.to_lowercase()) => {
                self.title.clone()
            }
            Some(subtitle) => format!("{} {}", self.title, subtitle),
        }
    }

    #[must_use]
    pub fn into_market(self) -> Market {
        let title = self.display_title();
        Market::new(self.ticker, title)
    }
}

/// One row of a quote table.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRow {
    pub polymarket_id: MarketId,
    #[serde(alias = "kalshi_ticker")]
    pub kalshi_id: MarketId,
    pub polymarket_yes: f64,
    pub polymarket_no: f64,
    pub kalshi_yes: f64,
    pub kalshi_no: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Rows of a listing file, bare or under `markets`.
///
/// Rows are deserialized after the envelope is unwrapped so a bad field
/// reports its own error instead of a failed envelope match.
fn listing_rows<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    let rows = match serde_json::from_str::<Value>(json)? {
        rows @ Value::Array(_) => rows,
        Value::Object(mut wrapper) => wrapper.remove("markets").ok_or_else(|| {
            <serde_json::Error as de::Error>::missing_field("markets")
        })?,
        other => {
            return Err(<serde_json::Error as de::Error>::invalid_type(
                unexpected(&other),
                &"an array of markets or an object with a `markets` array",
            )
            .into())
        }
    };
    Ok(serde_json::from_value(rows)?)
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Parse Polymarket listings and keep the open markets.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or an id repeats.
pub fn parse_polymarket(json: &str) -> Result<Vec<Market>> {
    let listings: Vec<PolymarketListing> = listing_rows(json)?;
    let total = listings.len();
    let markets: Vec<Market> = listings
        .into_iter()
        .filter(PolymarketListing::is_open)
        .map(PolymarketListing::into_market)
        .collect();
    ensure_unique_ids(Venue::Polymarket, &markets)?;
    info!(venue = %Venue::Polymarket, total, open = markets.len(), "Listings loaded");
    Ok(markets)
}

/// Parse Kalshi listings and keep the open markets.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a ticker repeats.
pub fn parse_kalshi(json: &str) -> Result<Vec<Market>> {
    let listings: Vec<KalshiListing> = listing_rows(json)?;
    let total = listings.len();
    let markets: Vec<Market> = listings
        .into_iter()
        .filter(KalshiListing::is_open)
        .map(KalshiListing::into_market)
        .collect();
    ensure_unique_ids(Venue::Kalshi, &markets)?;
    info!(venue = %Venue::Kalshi, total, open = markets.len(), "Listings loaded");
    Ok(markets)
}

/// Load a Polymarket listing file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_polymarket(path: &Path) -> Result<Vec<Market>> {
    parse_polymarket(&fs::read_to_string(path)?)
}

/// Load a Kalshi listing file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_kalshi(path: &Path) -> Result<Vec<Market>> {
    parse_kalshi(&fs::read_to_string(path)?)
}

/// Load matched pairs written by [`write_pairs`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_pairs(path: &Path) -> Result<Vec<MatchedPair>> {
    read_json(path)
}

/// Write matched pairs as a pretty JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_pairs(path: &Path, pairs: &[MatchedPair]) -> Result<()> {
    write_json(path, pairs)
}

/// Write any serializable report as pretty JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a quote table.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a row is malformed, or a
/// price is not finite.
pub fn load_quotes(path: &Path) -> Result<QuoteBook> {
    let rows: Vec<QuoteRow> = read_json(path)?;
    let mut book = QuoteBook::new();
    for row in rows {
        let quote = Quote::from_f64(
            row.polymarket_yes,
            row.polymarket_no,
            row.kalshi_yes,
            row.kalshi_no,
        )?;
        book.insert(row.polymarket_id, row.kalshi_id, quote);
    }
    Ok(book)
}
