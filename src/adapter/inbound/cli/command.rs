//! Command-line interface definitions.
//!
//! Defines the CLI structure for the hedgerow application using `clap`.
//! Subcommands cover matching venue listings, pricing a single quote,
//! scanning matched pairs against a quote table, and configuration checks.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "hedgerow.toml";

/// Cross-venue prediction market matching and hedge allocation
#[derive(Parser, Debug)]
#[command(name = "hedgerow")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the hedgerow CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match Polymarket and Kalshi listings into pairs
    Match(MatchArgs),

    /// Size a hedge for one set of asks
    Quote(QuoteArgs),

    /// Evaluate matched pairs against a quote table
    Scan(ScanArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Commands {
    /// Config path argument carried by the subcommand.
    #[must_use]
    pub fn config_arg(&self) -> &ConfigPathArg {
        match self {
            Self::Match(args) => &args.config,
            Self::Quote(args) => &args.config,
            Self::Scan(args) => &args.config,
            Self::Config(ConfigCommand::Show(arg) | ConfigCommand::Validate(arg)) => arg,
        }
    }
}

/// Subcommands for `hedgerow config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument for commands that read a config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigPathArg {
    /// Path to configuration file [default: hedgerow.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `hedgerow match`.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Polymarket listing JSON
    #[arg(long)]
    pub polymarket: PathBuf,

    /// Kalshi listing JSON
    #[arg(long)]
    pub kalshi: PathBuf,

    /// Write matched pairs to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

/// Arguments for `hedgerow quote`.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Polymarket YES ask
    #[arg(long)]
    pub poly_yes: Decimal,

    /// Polymarket NO ask
    #[arg(long)]
    pub poly_no: Decimal,

    /// Kalshi YES ask
    #[arg(long)]
    pub kalshi_yes: Decimal,

    /// Kalshi NO ask
    #[arg(long)]
    pub kalshi_no: Decimal,

    /// Total stake in dollars [default: from config]
    #[arg(long)]
    pub stake: Option<Decimal>,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

/// Arguments for `hedgerow scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Matched pairs JSON written by `hedgerow match -o`
    #[arg(long)]
    pub pairs: PathBuf,

    /// Quote table JSON
    #[arg(long)]
    pub quotes: PathBuf,

    /// Total stake in dollars [default: from config]
    #[arg(long)]
    pub stake: Option<Decimal>,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "hedgerow");
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hedgerow", "config", "show", "--json", "-vv", "--color", "never",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Never));
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommand::Show(_))
        ));
    }

    #[test]
    fn test_parse_match_args() {
        let cli = Cli::try_parse_from([
            "hedgerow",
            "match",
            "--polymarket",
            "poly.json",
            "--kalshi",
            "kalshi.json",
            "-o",
            "pairs.json",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        let Commands::Match(args) = cli.command else {
            panic!("expected match");
        };
        assert_eq!(args.polymarket, PathBuf::from("poly.json"));
        assert_eq!(args.output, Some(PathBuf::from("pairs.json")));
        assert_eq!(args.config.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_parse_quote_decimals() {
        let cli = Cli::try_parse_from([
            "hedgerow",
            "quote",
            "--poly-yes",
            "0.60",
            "--poly-no",
            "0.55",
            "--kalshi-yes",
            "0.40",
            "--kalshi-no",
            "0.70",
            "--stake",
            "25",
        ])
        .unwrap();
        let Commands::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.poly_no, dec!(0.55));
        assert_eq!(args.stake, Some(dec!(25)));
        assert!(args.config.config.is_none());
    }

    #[test]
    fn test_quote_requires_all_prices() {
        let result = Cli::try_parse_from(["hedgerow", "quote", "--poly-yes", "0.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quote_rejects_non_numeric_price() {
        let result = Cli::try_parse_from([
            "hedgerow",
            "quote",
            "--poly-yes",
            "cheap",
            "--poly-no",
            "0.5",
            "--kalshi-yes",
            "0.5",
            "--kalshi-no",
            "0.5",
        ]);
        assert!(result.is_err());
    }
}
