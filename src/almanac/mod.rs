//! Sunrise/sunset almanac poller.
//!
//! # Responsibilities
//! - Periodically query the sunrise/sunset API for the configured location
//! - Cache results per calendar day (the data only changes at midnight UTC)
//! - Expose sunrise and sunset as UTC timestamps to the snippet handlers
//!
//! # Design Decisions
//! - Fetch errors are logged and never crash the task; the previous day's
//!   data keeps being served until a fetch succeeds
//! - Accessors return None until the first successful fetch

use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time;

use crate::config::{AlmanacConfig, LocationConfig};

/// Daily almanac data, as returned by the API. Times are `HH:MM:SS` on
/// `date`, in UTC (the query pins `timezone=UTC`).
#[derive(Debug, Clone, Deserialize)]
struct AlmanacResults {
    date: String,
    sunrise: String,
    sunset: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AlmanacResponse {
    results: AlmanacResults,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned status {0:?}")]
    ApiStatus(String),
}

/// Shared sunrise/sunset state, refreshed by [`Almanac::run`].
pub struct Almanac {
    data: RwLock<Option<AlmanacResults>>,
    client: reqwest::Client,
    url: String,
    refresh_interval: Duration,
}

impl Almanac {
    pub fn new(config: &AlmanacConfig, location: &LocationConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let url = format!(
            "{}/json?lat={:.6}&lng={:.6}&timezone=UTC&time_format=24",
            config.base_url.trim_end_matches('/'),
            location.latitude,
            location.longitude,
        );
        Ok(Self {
            data: RwLock::new(None),
            client,
            url,
            refresh_interval: Duration::from_secs(config.refresh_interval_secs),
        })
    }

    /// Today's sunrise as a UTC timestamp, if known.
    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        self.parse_event(|r| r.sunrise.as_str(), "sunrise")
    }

    /// Today's sunset as a UTC timestamp, if known.
    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        self.parse_event(|r| r.sunset.as_str(), "sunset")
    }

    fn parse_event(
        &self,
        field: fn(&AlmanacResults) -> &str,
        name: &'static str,
    ) -> Option<DateTime<Utc>> {
        let guard = self.data.read().unwrap_or_else(|e| e.into_inner());
        let results = guard.as_ref()?;
        let stamp = format!("{} {}", results.date, field(results));
        match NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S") {
            Ok(naive) => Some(naive.and_utc()),
            Err(error) => {
                tracing::error!(event = name, value = %stamp, %error, "failed to parse almanac time");
                None
            }
        }
    }

    /// True when the cached data is already for today (UTC); the daily
    /// answer never changes, so the network call can be skipped.
    fn is_fresh(&self) -> bool {
        let guard = self.data.read().unwrap_or_else(|e| e.into_inner());
        let Some(results) = guard.as_ref() else {
            return false;
        };
        match NaiveDate::parse_from_str(&results.date, "%Y-%m-%d") {
            Ok(date) => date == Utc::now().date_naive(),
            Err(error) => {
                tracing::error!(date = %results.date, %error, "failed to parse almanac date");
                false
            }
        }
    }

    async fn fetch(&self) -> Result<(), FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<AlmanacResponse>()
            .await?;

        if !response.status.is_empty() && response.status != "OK" {
            return Err(FetchError::ApiStatus(response.status));
        }

        tracing::debug!(
            date = %response.results.date,
            sunrise = %response.results.sunrise,
            sunset = %response.results.sunset,
            "almanac refreshed"
        );

        let mut guard = self.data.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(response.results);
        Ok(())
    }

    async fn refresh(&self) {
        if self.is_fresh() {
            return;
        }
        if let Err(error) = self.fetch().await {
            tracing::error!(%error, "almanac fetch failed");
        }
    }

    /// Run the poll loop until the shutdown signal arrives. The first
    /// interval tick fires immediately, so data is available soon after
    /// startup.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.refresh_interval.as_secs(),
            url = %self.url,
            "almanac poller starting"
        );

        let mut ticker = time::interval(self.refresh_interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("almanac poller received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
