//! CLI module graph.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod matching;
pub mod output;
pub mod quote;
pub mod scan;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::{Commands, ConfigCommand, ConfigPathArg, DEFAULT_CONFIG};

/// Run the parsed subcommand against an already loaded config.
///
/// # Errors
///
/// Returns configuration, IO and parse errors. A quote without a hedge is
/// not an error.
pub async fn execute(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Match(args) => matching::execute(args, config).await,
        Commands::Quote(args) => quote::execute(args, config),
        Commands::Scan(args) => scan::execute(args, config),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(arg, config),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(arg),
    }
}

/// Load the config named by `-c`, else `hedgerow.toml` if present, else
/// defaults.
///
/// # Errors
///
/// Returns an error if an existing config file cannot be read or parsed.
pub fn load_config(arg: &ConfigPathArg) -> Result<Config> {
    match config_path(arg) {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Config file that [`load_config`] would read, if any.
#[must_use]
pub fn config_path(arg: &ConfigPathArg) -> Option<&Path> {
    match &arg.config {
        Some(path) => Some(path.as_path()),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            default.exists().then_some(default)
        }
    }
}
