//! Domain layer for postdeck.
//!
//! This module contains the core domain types for the application, independent
//! of HTTP, terminal, or threading concerns. It keeps the data model and error
//! taxonomy isolated from external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`post`]: Post and comment models and matching rules
//!
//! # Examples
//!
//! ```
//! use postdeck::domain::Post;
//!
//! let post = Post {
//!     id: 1,
//!     title: "My Title Example".to_string(),
//!     body: "body".to_string(),
//! };
//! assert!(post.title_matches("title"));
//! ```

pub mod error;
pub mod post;

pub use error::{PostdeckError, Result};
pub use post::{Comment, Post};
