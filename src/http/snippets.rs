//! HTML snippet handlers.
//!
//! The clock page polls these endpoints and swaps the returned fragments
//! into place. Each returns a single `<span>`; the sensor snippets carry a
//! CSS class describing the reading's health, which the stylesheet's
//! dark-mode-aware utilities pick up.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use chrono::{Duration, Utc};

use crate::http::server::AppState;
use crate::tailwind::BuildConfig;
use crate::temperature::Reading;

/// Current time of day, `HH:MM`, in the configured timezone.
pub async fn time(State(state): State<AppState>) -> Html<String> {
    let now = Utc::now().with_timezone(&state.timezone);
    Html(format!("<span>{}</span>", now.format("%H:%M")))
}

/// Long-form date, e.g. `Monday January 2 2006`.
pub async fn date(State(state): State<AppState>) -> Html<String> {
    let now = Utc::now().with_timezone(&state.timezone);
    Html(format!("<span>{}</span>", now.format("%A %B %-d %Y")))
}

/// Latest temperature, one decimal place.
pub async fn temperature(State(state): State<AppState>) -> Html<String> {
    match state.temperature.reading() {
        Some(reading) => Html(format!(
            "<span class='{}'>{:.1}°</span>",
            reading_class(&reading, &state),
            reading.temperature_c,
        )),
        None => Html("<span class='error'>--°</span>".to_string()),
    }
}

/// Latest relative humidity, whole percent.
pub async fn humidity(State(state): State<AppState>) -> Html<String> {
    match state.temperature.reading() {
        Some(reading) => Html(format!(
            "<span class='{}'>{:.0}%</span>",
            reading_class(&reading, &state),
            reading.humidity_pct,
        )),
        None => Html("<span class='error'>--%</span>".to_string()),
    }
}

/// Today's sunrise, `↑HH:MM` in the configured timezone.
pub async fn sunrise(State(state): State<AppState>) -> Html<String> {
    let text = match state.almanac.sunrise() {
        Some(at) => at.with_timezone(&state.timezone).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    };
    Html(format!("<span>↑{text}</span>"))
}

/// Today's sunset, `↓HH:MM` in the configured timezone.
pub async fn sunset(State(state): State<AppState>) -> Html<String> {
    let text = match state.almanac.sunset() {
        Some(at) => at.with_timezone(&state.timezone).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    };
    Html(format!("<span>↓{text}</span>"))
}

/// The validated stylesheet build configuration, as JSON.
pub async fn build_config(State(state): State<AppState>) -> Json<BuildConfig> {
    Json(state.build_config.as_ref().clone())
}

/// CSS class for a sensor reading: `error` for stale data, `battery` for a
/// low battery, empty otherwise. Staleness wins over battery.
fn reading_class(reading: &Reading, state: &AppState) -> &'static str {
    let stale_after = Duration::seconds(state.sensor.stale_after_secs as i64);
    if Utc::now() - reading.taken_at > stale_after {
        "error"
    } else if reading.battery_pct < state.sensor.low_battery_threshold {
        "battery"
    } else {
        ""
    }
}
