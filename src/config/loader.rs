//! Service configuration loading from disk.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// A missing file is not an error: every section has defaults and the
/// sensor credentials can arrive from the environment, so the service can
/// start with no config file at all.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let mut config: ServiceConfig = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        ServiceConfig::default()
    };

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay sensor credentials from the environment. Environment wins over
/// the file so tokens can stay out of it.
fn apply_env_overrides(config: &mut ServiceConfig) {
    let overrides = [
        ("EWELINK_APP_ID", &mut config.sensor.app_id),
        ("EWELINK_DEVICE_ID", &mut config.sensor.device_id),
        ("EWELINK_TOKEN", &mut config.sensor.token),
    ];
    for (var, field) in overrides {
        if let Ok(value) = env::var(var) {
            if !value.is_empty() {
                *field = value;
            }
        }
    }
}
