use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use hedgerow::adapter::inbound::cli::command::{Cli, ColorChoice};
use hedgerow::adapter::inbound::cli::output::{self, OutputConfig};
use hedgerow::adapter::inbound::cli::{self, diagnostic};
use hedgerow::error::Error;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let color = match args.color {
        ColorChoice::Auto => std::io::stdout().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    let out = OutputConfig::new(args.json, args.quiet, args.verbose).with_color(color);
    output::configure(out);

    let config_arg = args.command.config_arg();
    let config = match cli::load_config(config_arg) {
        Ok(config) => config,
        Err(e) => return fail(&e, cli::config_path(config_arg)),
    };
    config
        .logging
        .init_with_level(&out.log_level(&config.logging.level));

    match cli::execute(&args.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e, cli::config_path(config_arg)),
    }
}

/// Report `error` on stderr, with a source snippet when it points into the
/// config file.
fn fail(error: &Error, config_path: Option<&Path>) -> ExitCode {
    if !output::is_json() {
        if let Some(diagnostic) = config_path.and_then(|path| diagnostic::for_config(error, path)) {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return ExitCode::FAILURE;
        }
    }
    output::error(&error.to_string());
    ExitCode::FAILURE
}
