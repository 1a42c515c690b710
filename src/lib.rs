//! Postdeck: a terminal browser for JSONPlaceholder-style post APIs.
//!
//! Postdeck is an interactive terminal application that provides:
//! - A scrollable post list fetched page-by-page from a remote REST API
//! - Case-insensitive title filtering over everything loaded so far
//! - Infinite scrolling with a single page fetch in flight at a time
//! - A comments overlay that opens once its data has arrived
//! - A per-post detail page with not-found handling
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shim (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Client Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (client/)     │   │ (worker/)     │
//! │ - Rendering   │   │ - HTTP source │   │ - Async fetch │
//! │ - Theming     │   │ - Trait seam  │   │ - Channels    │
//! │ - Components  │   │ - Endpoints   │   │ - Runtime     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Post/Comment models (domain/post)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber setup                         │
//! │  - Non-blocking file log output                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`client`]: HTTP access to the remote post API behind a trait seam
//! - [`domain`]: Core domain types (Post, Comment, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`worker`]: Background worker for asynchronous fetching
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: Structured logging to file
//!
//! # Configuration
//!
//! The application is configured via `POSTDECK_*` environment variables:
//!
//! ```text
//! POSTDECK_BASE_URL    # API base URL (default: https://jsonplaceholder.typicode.com)
//! POSTDECK_PAGE_SIZE   # posts per page (default: 12)
//! POSTDECK_THEME       # built-in theme name (catppuccin-mocha, catppuccin-latte)
//! POSTDECK_THEME_FILE  # custom TOML theme file, overrides POSTDECK_THEME
//! POSTDECK_LOG         # log level (trace, debug, info, warn, error)
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Startup** (`main.rs`):
//!    - Parse configuration from the environment
//!    - Initialize tracing (optional)
//!    - Create `AppState` with theme
//!    - Spawn the fetch worker thread
//!    - Feed the `Start` event, which issues the first page fetch
//!
//! 2. **Event Loop**:
//!    - Poll terminal input and the worker response channel
//!    - Translate input into library events
//!    - Execute returned actions (worker posts, quit)
//!    - Render when an event reports visible changes
//!
//! 3. **Worker Processing**:
//!    - Execute fetch requests sequentially against the HTTP source
//!    - Send typed responses back to the event loop
//!
//! # Examples
//!
//! ## Basic Usage (Library)
//!
//! ```rust
//! use postdeck::{handle_event, initialize, Config, Event};
//!
//! let config = Config::default();
//! let mut state = initialize(&config);
//!
//! // The start event issues the initial page fetch as an action.
//! let (should_render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), postdeck::PostdeckError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Single Fetch In Flight
//!
//! Pagination runs through a small state machine ([`app::Pager`]) that admits
//! at most one page fetch at a time. Scroll triggers arriving while a fetch is
//! pending are dropped, and completion (success or failure) re-arms the
//! machine.
//!
//! ## Fetch-Then-Reveal Overlay
//!
//! The comments overlay never renders in a loading state. Requesting comments
//! records the post as pending; the overlay is created only when the matching
//! response arrives, and a failed fetch silently leaves the list untouched.
//!
//! ## Immutable View Models
//!
//! UI rendering uses computed view models:
//! - Clear separation between state and display
//! - Enables testing every visible behavior headlessly
//! - Pre-computes expensive operations (match highlighting, windowing)

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Route, SearchFocus};
pub use client::{HttpPostSource, PostSource, DEFAULT_BASE_URL};
pub use domain::{Comment, Post, PostdeckError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Application configuration parsed from the environment.
///
/// Every knob has a sensible default, so an empty environment yields a
/// working configuration pointed at the public JSONPlaceholder API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote post API.
    ///
    /// Default: `https://jsonplaceholder.typicode.com`
    pub base_url: String,

    /// Number of posts requested per page.
    ///
    /// Passed as the `_limit` query parameter. Default: 12
    pub page_size: u32,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Log level for file output.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`.
    /// `RUST_LOG` overrides this when set.
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 12,
            theme_name: None,
            theme_file: None,
            log_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a key-value map.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: String (falls back to [`DEFAULT_BASE_URL`])
    /// - `page_size`: String → `u32` (falls back to 12 on parse error or zero)
    /// - `theme`: String → `Option<String>`
    /// - `theme_file`: String → `Option<String>`
    /// - `log_level`: String → `Option<String>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use postdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://localhost:3000".to_string());
    /// map.insert("page_size".to_string(), "20".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.base_url, "http://localhost:3000");
    /// assert_eq!(config.page_size, 20);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let base_url = map
            .get("base_url")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let page_size = map
            .get("page_size")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(12);

        Self {
            base_url,
            page_size,
            theme_name: map.get("theme").cloned(),
            theme_file: map.get("theme_file").cloned(),
            log_level: map.get("log_level").cloned(),
        }
    }

    /// Builds configuration from `POSTDECK_*` environment variables.
    ///
    /// Unset variables fall back to defaults; malformed values are ignored the
    /// same way [`from_map`](Self::from_map) ignores them.
    #[must_use]
    pub fn from_env() -> Self {
        let vars = [
            ("base_url", "POSTDECK_BASE_URL"),
            ("page_size", "POSTDECK_PAGE_SIZE"),
            ("theme", "POSTDECK_THEME"),
            ("theme_file", "POSTDECK_THEME_FILE"),
            ("log_level", "POSTDECK_LOG"),
        ];

        let mut map = BTreeMap::new();
        for (key, var) in vars {
            if let Ok(value) = std::env::var(var) {
                map.insert(key.to_string(), value);
            }
        }
        Self::from_map(&map)
    }
}

/// Initializes the application with configuration.
///
/// Creates a new `AppState` with:
/// - Loaded theme (from file, name, or default)
/// - Empty post list (populated later by the fetch worker)
///
/// # Example
///
/// ```rust
/// use postdeck::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.posts.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "initializing postdeck");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file.clone()).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, config.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_yields_defaults() {
        let config = Config::from_map(&BTreeMap::new());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, 12);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn map_values_override_defaults() {
        let mut map = BTreeMap::new();
        map.insert("base_url".to_string(), "http://localhost:3000".to_string());
        map.insert("page_size".to_string(), "25".to_string());
        map.insert("theme".to_string(), "catppuccin-latte".to_string());
        map.insert("log_level".to_string(), "debug".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_page_size_falls_back() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "lots".to_string());
        assert_eq!(Config::from_map(&map).page_size, 12);

        map.insert("page_size".to_string(), "0".to_string());
        assert_eq!(Config::from_map(&map).page_size, 12);
    }

    #[test]
    fn initialize_uses_named_theme() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-latte");
    }

    #[test]
    fn initialize_falls_back_on_unknown_theme() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }
}
