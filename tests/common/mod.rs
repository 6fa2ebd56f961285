//! Shared helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use wallclock::almanac::Almanac;
use wallclock::config::ServiceConfig;
use wallclock::lifecycle::Shutdown;
use wallclock::tailwind::BuildConfig;
use wallclock::temperature::Temperature;
use wallclock::HttpServer;

/// Start a mock sunrise/sunset API serving a fixed payload on `/json`.
pub async fn start_mock_almanac(date: &str, sunrise: &str, sunset: &str) -> SocketAddr {
    let payload: Value = json!({
        "results": {
            "date": date,
            "sunrise": sunrise,
            "sunset": sunset,
            "day_length": "12:00:00",
            "timezone": "UTC",
            "utc_offset": 0
        },
        "status": "OK"
    });

    let app = Router::new().route(
        "/json",
        get(move || {
            let payload = payload.clone();
            async move { Json(payload) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a mock eWeLink API serving a fixed device payload.
pub async fn start_mock_ewelink(payload: Value) -> SocketAddr {
    let app = Router::new().route(
        "/api/user/device/{device_id}",
        get(move || {
            let payload = payload.clone();
            async move { Json(payload) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A device payload with the given readings, in the API's hundredths
/// encoding.
pub fn device_payload(temperature: &str, humidity: &str, battery: i64) -> Value {
    json!({
        "code": 0,
        "error": "",
        "params": {
            "battery": battery,
            "temperature": temperature,
            "humidity": humidity
        }
    })
}

/// Start the dashboard on an ephemeral port with its almanac poller
/// running. The returned Shutdown must be kept alive for the duration of
/// the test, otherwise the server drains immediately.
pub async fn start_dashboard(
    config: ServiceConfig,
    build_config: BuildConfig,
) -> (SocketAddr, Shutdown) {
    let almanac = Arc::new(Almanac::new(&config.almanac, &config.location).unwrap());
    let temperature = Arc::new(Temperature::new(&config.sensor).unwrap());

    let shutdown = Shutdown::new();
    {
        let almanac = almanac.clone();
        let rx = shutdown.subscribe();
        tokio::spawn(async move { almanac.run(rx).await });
    }
    if config.sensor.enabled {
        let temperature = temperature.clone();
        let rx = shutdown.subscribe();
        tokio::spawn(async move { temperature.run(rx).await });
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(&config, Arc::new(build_config), almanac, temperature);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
