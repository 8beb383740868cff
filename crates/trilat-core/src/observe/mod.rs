//! # Observability
//!
//! The solver is instrumented with `tracing` events only. This module wires
//! those events to an output via `tracing-subscriber`.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
