//! Wall-clock dashboard service.
//!
//! Serves a clock page plus the HTML snippets it polls (time, date,
//! temperature, humidity, sunrise, sunset), backed by two background
//! pollers: a sunrise/sunset almanac with a per-day cache and an eWeLink
//! temperature sensor. Both configuration documents (the service's own
//! TOML and the page's utility-CSS build configuration) are validated at
//! startup; either failing aborts before the listener binds.

// Core subsystems
pub mod config;
pub mod http;
pub mod tailwind;

// Background pollers
pub mod almanac;
pub mod temperature;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use tailwind::{BuildConfig, DarkModeStrategy, ParseError};
