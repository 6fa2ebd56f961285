//! eWeLink temperature/humidity sensor poller.
//!
//! # Responsibilities
//! - Periodically query the eWeLink cloud for the sensor device
//! - Convert the stringly hundredths values into floats
//! - Expose the latest reading, with its age, to the snippet handlers
//!
//! # Design Decisions
//! - Each request carries a fresh 5-char nonce and a Unix timestamp, as the
//!   eWeLink API expects
//! - Fetch errors are logged and never crash the task; staleness is
//!   surfaced to the UI through the reading's `taken_at`

use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time;
use uuid::Uuid;

use crate::config::SensorConfig;

/// Device query response, trimmed to the fields the dashboard consumes.
#[derive(Debug, Deserialize)]
struct DeviceResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    error: String,
    #[serde(default)]
    params: DeviceParams,
}

#[derive(Debug, Default, Deserialize)]
struct DeviceParams {
    #[serde(default)]
    battery: i64,
    /// Degrees Celsius in hundredths, as a string.
    #[serde(default)]
    temperature: String,
    /// Relative humidity in hundredths of a percent, as a string.
    #[serde(default)]
    humidity: String,
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error code {code}: {message}")]
    Api { code: i64, message: String },

    #[error("unparseable {field} value {value:?}")]
    BadValue { field: &'static str, value: String },
}

/// One sensor reading.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub battery_pct: i64,
    pub taken_at: DateTime<Utc>,
}

/// Shared sensor state, refreshed by [`Temperature::run`].
pub struct Temperature {
    reading: RwLock<Option<Reading>>,
    client: reqwest::Client,
    config: SensorConfig,
}

impl Temperature {
    pub fn new(config: &SensorConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            reading: RwLock::new(None),
            client,
            config: config.clone(),
        })
    }

    /// The latest reading, or None before the first successful fetch.
    pub fn reading(&self) -> Option<Reading> {
        *self.reading.read().unwrap_or_else(|e| e.into_inner())
    }

    fn device_url(&self) -> String {
        // 5 chars of a dashless v4 UUID; the API only requires uniqueness.
        let uuid = Uuid::new_v4().simple().to_string();
        let nonce = &uuid[..5];
        format!(
            "{}/api/user/device/{}?appid={}&version=8&deviceid={}&nonce={}&ts={}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.device_id,
            self.config.app_id,
            self.config.device_id,
            nonce,
            Utc::now().timestamp(),
        )
    }

    async fn fetch(&self) -> Result<(), FetchError> {
        let response = self
            .client
            .get(self.device_url())
            .bearer_auth(&self.config.token)
            .header("Content-Type", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<DeviceResponse>()
            .await?;

        if response.code != 0 {
            return Err(FetchError::Api {
                code: response.code,
                message: response.error,
            });
        }

        let temperature_c = parse_hundredths(&response.params.temperature, "temperature")?;
        let humidity_pct = parse_hundredths(&response.params.humidity, "humidity")?;

        let reading = Reading {
            temperature_c,
            humidity_pct,
            battery_pct: response.params.battery,
            taken_at: Utc::now(),
        };

        tracing::debug!(
            temperature_c,
            humidity_pct,
            battery_pct = reading.battery_pct,
            "sensor refreshed"
        );

        let mut guard = self.reading.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(reading);
        Ok(())
    }

    /// Run the poll loop until the shutdown signal arrives.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.config.refresh_interval_secs,
            device_id = %self.config.device_id,
            "sensor poller starting"
        );

        let mut ticker = time::interval(Duration::from_secs(self.config.refresh_interval_secs));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(error) = self.fetch().await {
                        tracing::error!(%error, "sensor fetch failed");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("sensor poller received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

fn parse_hundredths(value: &str, field: &'static str) -> Result<f64, FetchError> {
    let raw: f64 = value.parse().map_err(|_| FetchError::BadValue {
        field,
        value: value.to_string(),
    })?;
    Ok(raw / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundredths_values_are_scaled() {
        assert_eq!(parse_hundredths("2140", "temperature").unwrap(), 21.4);
        assert_eq!(parse_hundredths("6320", "humidity").unwrap(), 63.2);
        assert_eq!(parse_hundredths("-350", "temperature").unwrap(), -3.5);
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let result = parse_hundredths("unavailable", "temperature");
        assert!(matches!(
            result,
            Err(FetchError::BadValue {
                field: "temperature",
                ..
            })
        ));
    }
}
