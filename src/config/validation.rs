//! Service configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (coordinates, intervals > 0)
//! - Check the timezone resolves and the bind address parses
//! - Require sensor credentials when the sensor is enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use chrono_tz::Tz;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// One semantic problem found in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BindAddress(String),

    #[error("location.timezone {0:?} is not a known IANA timezone")]
    Timezone(String),

    #[error("location.latitude must be within [-90, 90]")]
    LatitudeRange,

    #[error("location.longitude must be within [-180, 180]")]
    LongitudeRange,

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("sensor.{0} is required when the sensor is enabled")]
    MissingCredential(&'static str),
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.location.timezone.parse::<Tz>().is_err() {
        errors.push(ValidationError::Timezone(config.location.timezone.clone()));
    }
    if !(-90.0..=90.0).contains(&config.location.latitude) {
        errors.push(ValidationError::LatitudeRange);
    }
    if !(-180.0..=180.0).contains(&config.location.longitude) {
        errors.push(ValidationError::LongitudeRange);
    }

    let durations = [
        ("almanac.refresh_interval_secs", config.almanac.refresh_interval_secs),
        ("almanac.request_timeout_secs", config.almanac.request_timeout_secs),
        ("sensor.refresh_interval_secs", config.sensor.refresh_interval_secs),
        ("sensor.request_timeout_secs", config.sensor.request_timeout_secs),
        ("sensor.stale_after_secs", config.sensor.stale_after_secs),
    ];
    for (name, value) in durations {
        if value == 0 {
            errors.push(ValidationError::ZeroDuration(name));
        }
    }

    if config.sensor.enabled {
        let credentials = [
            ("app_id", &config.sensor.app_id),
            ("device_id", &config.sensor.device_id),
            ("token", &config.sensor.token),
        ];
        for (name, value) in credentials {
            if value.is_empty() {
                errors.push(ValidationError::MissingCredential(name));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
