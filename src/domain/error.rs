//! Error types for postdeck.
//!
//! This module defines the centralized error type [`PostdeckError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for postdeck operations.
///
/// This enum consolidates all error conditions that can occur while the
/// application runs, from HTTP transport failures to configuration issues.
/// Transport errors wrap the underlying `reqwest` error using `#[from]` for
/// automatic conversion.
///
/// Per the application's degradation policy, most of these errors are never
/// surfaced to the user: a failed fetch leaves the relevant UI state unset and
/// is recorded via `tracing`. The only user-visible failure is a not-found
/// post on the detail route.
#[derive(Debug, Error)]
pub enum PostdeckError {
    /// HTTP request failed at the transport level.
    ///
    /// Covers connection failures, timeouts, and TLS errors. Wraps
    /// `reqwest::Error` via `#[from]`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected JSON shape.
    ///
    /// The string describes the decode failure and the endpoint it came from.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A remote endpoint returned a non-success status.
    ///
    /// Holds the HTTP status code. A 404 on the item endpoint is handled
    /// separately as a not-found indication and never produces this variant.
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, mainly from the
    /// observability layer's log directory handling.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    ///
    /// Occurs when a theme file cannot be read or its TOML cannot be parsed.
    /// The string contains a description of what went wrong.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background fetch worker failed.
    ///
    /// Occurs when the worker thread has shut down and its channel is closed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for postdeck operations.
///
/// This is a type alias for `std::result::Result<T, PostdeckError>` that
/// simplifies function signatures throughout the codebase.
///
/// # Examples
///
/// ```
/// use postdeck::domain::Result;
///
/// fn parse_page(raw: &str) -> Result<u32> {
///     raw.parse()
///         .map_err(|_| postdeck::domain::PostdeckError::Config(format!("bad page: {raw}")))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PostdeckError>;
