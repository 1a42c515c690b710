//! Remote post source: trait seam and HTTP implementation.
//!
//! This module is the application's only gateway to the network. The
//! [`PostSource`] trait abstracts the three REST endpoints (post pages, single
//! posts, comments); [`HttpPostSource`] implements them with `reqwest`.
//!
//! The fetch worker owns a `Box<dyn PostSource>`, so everything above this
//! layer is testable with an in-memory double.

pub mod http;
pub mod source;

pub use http::{HttpPostSource, DEFAULT_BASE_URL};
pub use source::PostSource;
