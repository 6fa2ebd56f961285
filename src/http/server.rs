//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, request timeout)
//! - Serve the static clock page and stylesheet
//! - Run with graceful shutdown

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use chrono_tz::Tz;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::services::ServeFile;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::almanac::Almanac;
use crate::config::{SensorConfig, ServiceConfig};
use crate::http::snippets;
use crate::tailwind::BuildConfig;
use crate::temperature::Temperature;

/// Request timeout for every route. Snippets are tiny and the statics are
/// local files, so anything slower than this is stuck.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub almanac: Arc<Almanac>,
    pub temperature: Arc<Temperature>,
    pub build_config: Arc<BuildConfig>,
    pub timezone: Tz,
    pub sensor: SensorConfig,
}

/// HTTP server for the dashboard.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and services.
    pub fn new(
        config: &ServiceConfig,
        build_config: Arc<BuildConfig>,
        almanac: Arc<Almanac>,
        temperature: Arc<Temperature>,
    ) -> Self {
        let state = AppState {
            almanac,
            temperature,
            build_config,
            timezone: config.location.resolve_timezone(),
            sensor: config.sensor.clone(),
        };

        let router = Self::build_router(&config.assets.static_dir, state);
        Self { router }
    }

    /// Build the Axum router with all routes and middleware layers.
    fn build_router(static_dir: &Path, state: AppState) -> Router {
        Router::new()
            .route_service("/clock", ServeFile::new(static_dir.join("clock.html")))
            .route_service("/dist.css", ServeFile::new(static_dir.join("dist.css")))
            .route("/snippets/time", get(snippets::time))
            .route("/snippets/date", get(snippets::date))
            .route("/snippets/temperature", get(snippets::temperature))
            .route("/snippets/humidity", get(snippets::humidity))
            .route("/snippets/sunrise", get(snippets::sunrise))
            .route("/snippets/sunset", get(snippets::sunset))
            .route("/data.json", get(snippets::build_config))
            .with_state(state)
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on the given listener until shutdown is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await
    }
}
