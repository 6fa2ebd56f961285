//! Tailwind build configuration handling.
//!
//! # Data Flow
//! ```text
//! static/tailwind.config.json
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (semantic checks: non-empty content, glob syntax)
//!     → BuildConfig (validated, immutable)
//!     → logged at startup, served at /data.json
//! ```
//!
//! # Design Decisions
//! - The document describes how `dist.css` was produced; this service never
//!   generates CSS, it only validates and exposes the declaration
//! - Parse failure aborts startup: the document is the sole source of truth
//! - Theme extension maps preserve declaration order

pub mod loader;
pub mod schema;

pub use loader::{load_build_config, parse_build_config, ParseError};
pub use schema::{BuildConfig, DarkModeStrategy, ThemeConfig};
