//! Observability subsystem: structured logging setup.

pub mod logging;
