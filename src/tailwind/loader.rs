//! Build configuration loading and validation.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::tailwind::schema::BuildConfig;

/// Failure to produce a validated [`BuildConfig`].
///
/// There is no recovery path: the document is the sole source of truth, so
/// the caller aborts startup. A partially-populated config is never
/// observable.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read build config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed build config: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("`content` must list at least one glob pattern")]
    EmptyContent,

    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },
}

/// Parse and validate a build configuration document.
///
/// Construction is atomic: either every field is populated and validated,
/// or a [`ParseError`] is returned. Parsing the same text twice yields
/// equal values.
pub fn parse_build_config(text: &str) -> Result<BuildConfig, ParseError> {
    let config: BuildConfig = serde_json::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate a build configuration from a JSON file.
pub fn load_build_config(path: &Path) -> Result<BuildConfig, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_build_config(&text)
}

/// Semantic checks beyond what serde enforces.
fn validate(config: &BuildConfig) -> Result<(), ParseError> {
    if config.content.is_empty() {
        return Err(ParseError::EmptyContent);
    }
    for pattern in &config.content {
        glob::Pattern::new(pattern).map_err(|source| ParseError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
    }
    Ok(())
}
