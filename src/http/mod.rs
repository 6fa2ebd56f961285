//! HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! clock page (GET /clock)
//!     → polls /snippets/* for HTML fragments
//!     → handlers read shared Almanac / Temperature state
//!     → fragments styled by /dist.css (built per /data.json's config)
//! ```

pub mod server;
pub mod snippets;

pub use server::{AppState, HttpServer};
