//! Wall-clock dashboard service.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │                  WALLCLOCK                    │
//!                 │                                               │
//!   GET /clock    │  ┌─────────┐     ┌──────────────────────────┐ │
//!   ──────────────┼─▶│  http   │────▶│ static: clock.html,      │ │
//!   GET /snippets │  │ server  │     │ dist.css                 │ │
//!   ──────────────┼─▶│         │──┐  └──────────────────────────┘ │
//!                 │  └─────────┘  │                               │
//!                 │               ▼                               │
//!                 │  ┌─────────────────────┐  ┌────────────────┐  │
//!                 │  │ almanac poller      │  │ sensor poller  │  │
//!                 │  │ (sunrise/sunset,    │  │ (eWeLink,      │  │
//!                 │  │  per-day cache)     │  │  5 min)        │  │
//!                 │  └─────────────────────┘  └────────────────┘  │
//!                 │                                               │
//!                 │  ┌─────────────────────────────────────────┐  │
//!                 │  │          Cross-Cutting Concerns          │  │
//!                 │  │  config (TOML)  tailwind (BuildConfig)   │  │
//!                 │  │  lifecycle (signals/shutdown)  logging   │  │
//!                 │  └─────────────────────────────────────────┘  │
//!                 └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use wallclock::almanac::Almanac;
use wallclock::http::HttpServer;
use wallclock::lifecycle::{signals, Shutdown};
use wallclock::observability::logging;
use wallclock::temperature::Temperature;
use wallclock::{config, tailwind};

#[derive(Debug, Parser)]
#[command(name = "wallclock", version, about = "Wall-clock dashboard service")]
struct Args {
    /// Path to the service configuration file.
    #[arg(long, default_value = "wallclock.toml")]
    config: PathBuf,

    /// Validate both configuration documents and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "wallclock starting");

    let config = config::load_config(&args.config)?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        timezone = %config.location.timezone,
        sensor_enabled = config.sensor.enabled,
        "configuration loaded"
    );

    // The build config has no defaults to fall back to: a malformed
    // document aborts startup before the listener binds.
    let build_config = tailwind::load_build_config(&config.assets.tailwind_config)?;
    tracing::info!(
        content_globs = build_config.content.len(),
        plugins = build_config.plugins.len(),
        dark_mode = ?build_config.dark_mode,
        "build config validated"
    );

    if args.check {
        println!("configuration OK");
        return Ok(());
    }

    let almanac = Arc::new(Almanac::new(&config.almanac, &config.location)?);
    let temperature = Arc::new(Temperature::new(&config.sensor)?);

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    {
        let almanac = almanac.clone();
        let rx = shutdown.subscribe();
        tokio::spawn(async move { almanac.run(rx).await });
    }
    if config.sensor.enabled {
        let temperature = temperature.clone();
        let rx = shutdown.subscribe();
        tokio::spawn(async move { temperature.run(rx).await });
    } else {
        tracing::info!("sensor poller disabled");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let server = HttpServer::new(&config, Arc::new(build_config), almanac, temperature);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
