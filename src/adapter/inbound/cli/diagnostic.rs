//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration problems are rendered with the offending TOML snippet and
//! a label pointing at it.

use std::fs;
use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(hedgerow::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// The configuration file.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Build a diagnostic for a config error raised while loading `path`.
///
/// Returns `None` when the error carries no location, or the file can no
/// longer be read.
#[must_use]
pub fn for_config(error: &Error, path: &Path) -> Option<ConfigDiagnostic> {
    let Error::Config(config_error) = error else {
        return None;
    };
    let src = fs::read_to_string(path).ok()?;
    let name = path.display().to_string();

    match config_error {
        ConfigError::Parse(parse) => {
            let span = parse.span()?;
            Some(
                ConfigDiagnostic::new(
                    parse.message().to_string(),
                    name,
                    src,
                    span.start,
                    span.end.saturating_sub(span.start),
                )
                .with_help("check the TOML syntax and value types"),
            )
        }
        ConfigError::InvalidValue { field, reason } => {
            let offset = find_key(&src, field)?;
            Some(
                ConfigDiagnostic::new(
                    format!("invalid value for {field}"),
                    name,
                    src,
                    offset,
                    field.len(),
                )
                .with_help(reason.clone()),
            )
        }
        _ => None,
    }
}

/// Byte offset of the first `key =` assignment in a TOML document.
fn find_key(src: &str, key: &str) -> Option<usize> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key) {
            if rest.trim_start().starts_with('=') {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len();
    }
    None
}
