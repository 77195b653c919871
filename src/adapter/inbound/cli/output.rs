//! Terminal output for CLI handlers.
//!
//! Three modes share one set of calls: human-readable text (default),
//! quiet (only warnings and errors), and JSON, where each command prints a
//! single JSON document on stdout and decorative lines are dropped. Logs
//! always go to stderr, so JSON output stays parseable.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit one JSON document instead of text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
    /// Emit ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
            color: false,
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Log level implied by the flags.
    #[must_use]
    pub fn log_level(&self, configured: &str) -> String {
        match (self.quiet, self.verbose) {
            (true, _) => "error".into(),
            (false, 0) => configured.into(),
            (false, 1) => "debug".into(),
            (false, _) => "trace".into(),
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn current() -> OutputConfig {
    let cell = OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()));
    match cell.read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    let cell = OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()));
    match cell.write() {
        Ok(mut slot) => *slot = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

fn paint(text: impl Display, style: fn(String) -> String) -> String {
    let text = text.to_string();
    if current().color {
        style(text)
    } else {
        text
    }
}

fn bold(text: impl Display) -> String {
    paint(text, |t| t.bold().to_string())
}

fn dimmed(text: impl Display) -> String {
    paint(text, |t| t.dimmed().to_string())
}

fn green(text: impl Display) -> String {
    paint(text, |t| t.green().to_string())
}

fn red(text: impl Display) -> String {
    paint(text, |t| t.red().to_string())
}

fn yellow(text: impl Display) -> String {
    paint(text, |t| t.yellow().to_string())
}

/// Text output is shown: not JSON and not quiet.
fn chatty() -> bool {
    let config = current();
    !config.json && !config.quiet
}

/// Print the application name and version.
pub fn header(version: &str) {
    if chatty() {
        println!("{} {}", bold("hedgerow"), dimmed(version));
    }
}

/// Print a section title.
pub fn section(title: &str) {
    if chatty() {
        println!();
        println!("{}", bold(title));
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if chatty() {
        println!("  {} {}", dimmed(format!("{label:<16}")), value);
    }
}

pub fn success(message: &str) {
    if chatty() {
        println!("  {} {}", green("✓"), message);
    }
}

/// Print a warning; shown in quiet mode too.
pub fn warning(message: &str) {
    if !is_json() {
        eprintln!("  {} {}", yellow("⚠"), message);
    }
}

/// Print an error to stderr in every mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", serde_json::json!({ "error": message }));
    } else {
        eprintln!("  {} {}", red("×"), message);
    }
}

pub fn note(message: &str) {
    if chatty() {
        println!("  {}", dimmed(message));
    }
}

/// Render rows as a table.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    if chatty() {
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        for line in table.to_string().lines() {
            println!("  {line}");
        }
    }
}

/// Print `value` as the command's JSON document.
pub fn json<T: Serialize + ?Sized>(value: &T) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a spinner; hidden in JSON or quiet mode.
pub fn spinner(message: &str) -> ProgressBar {
    if !chatty() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    if pb.is_hidden() {
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!("{} {}", green("✓"), message));
}

pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    if pb.is_hidden() {
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!("{} {}", red("×"), message));
}

/// Dollar amount rounded to cents.
#[must_use]
pub fn money(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}

/// Percentage rounded to two places.
#[must_use]
pub fn percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

/// Color a signed amount green or red.
#[must_use]
pub fn signed(value: Decimal, text: String) -> String {
    if value.is_sign_negative() {
        red(text)
    } else {
        green(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(money(dec!(10.4548)), "$10.45");
        assert_eq!(money(dec!(4.4)), "$4.40");
    }

    #[test]
    fn percent_rounds_to_two_places() {
        assert_eq!(percent(dec!(5.263157)), "5.26%");
    }

    #[test]
    fn flags_pick_log_level() {
        assert_eq!(OutputConfig::new(false, true, 2).log_level("info"), "error");
        assert_eq!(OutputConfig::new(false, false, 0).log_level("warn"), "warn");
        assert_eq!(OutputConfig::new(false, false, 1).log_level("info"), "debug");
        assert_eq!(OutputConfig::new(true, false, 3).log_level("info"), "trace");
    }
}
