//! Structured logging with file-based output.
//!
//! This module provides the logging infrastructure for the browser. Events and
//! spans emitted through the `tracing` macros are filtered, formatted, and
//! written to a log file in the platform data directory.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → non-blocking appender → postdeck.log
//! ```
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `POSTDECK_LOG` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup

mod init;

pub use init::init_tracing;
