//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! terminal frontend (main.rs) and the domain/client/worker layers. It
//! implements the event-driven architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode, route, and overlay state types
//! - [`pager`]: Pagination state machine (page cursor + in-flight flag)
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod pager;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DetailState, InputMode, Overlay, Route, SearchFocus};
pub use pager::{FetchState, Pager};
pub use state::AppState;
