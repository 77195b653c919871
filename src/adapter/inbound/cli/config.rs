//! Handler for the `config` command group.

use crate::adapter::inbound::cli::command::{ConfigPathArg, DEFAULT_CONFIG};
use crate::adapter::inbound::cli::{config_path, output};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(arg: &ConfigPathArg, config: &Config) -> Result<()> {

    if output::is_json() {
        return output::json(&config);
    }

    output::section("Effective Configuration");
    match config_path(arg) {
        Some(path) => output::field("Source", path.display()),
        None => output::field("Source", "(defaults)"),
    }

    output::section("Matching");
    output::field("Rarity ceiling", config.matching.rarity_ceiling);
    output::field("Threshold", config.matching.similarity_threshold);
    output::field("Assignment", format!("{:?}", config.matching.assignment).to_lowercase());
    output::field("Warm-up", describe_warmup(config));

    output::section("Embedding");
    output::field("Provider", format!("{:?}", config.embedding.provider).to_lowercase());
    output::field("Dimension", config.embedding.dimension);
    output::field("OpenAI model", &config.embedding.openai.model);

    output::section("Allocation");
    output::field("Stake", output::money(config.allocation.stake));
    output::field("Fee model", format!("{:?}", config.allocation.fee_model).to_lowercase());
    output::field("Fee rate", config.allocation.fee_rate);
    output::field("Discrete venue", config.allocation.discrete_venue);

    Ok(())
}

fn describe_warmup(config: &Config) -> String {
    if config.matching.warmup_concurrency > 1 {
        format!(
            "{} concurrent batches of {}",
            config.matching.warmup_concurrency, config.matching.warmup_batch_size
        )
    } else {
        "disabled".into()
    }
}

/// Execute `config validate`.
///
/// Unlike the other commands, a missing file is an error here.
pub fn execute_validate(arg: &ConfigPathArg) -> Result<()> {
    let path = arg
        .config
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG.into());
    if !path.exists() {
        return Err(ConfigError::ReadFile(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        ))
        .into());
    }

    Config::load(&path)?;

    if output::is_json() {
        return output::json(&serde_json::json!({
            "command": "config.validate",
            "path": path,
            "valid": true,
        }));
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");
    Ok(())
}
