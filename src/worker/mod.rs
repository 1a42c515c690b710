//! Background fetch worker and its message protocol.
//!
//! All network I/O runs on a dedicated worker thread so the terminal event
//! loop stays responsive. The event handler emits [`FetchRequest`] messages as
//! actions; the worker executes them against a [`PostSource`](crate::client::PostSource)
//! and replies with [`FetchResponse`] messages that feed back into the event
//! loop.
//!
//! # Modules
//!
//! - [`handler`]: Worker thread, runtime, and request processing
//! - [`messages`]: Request/response message types

pub mod handler;
pub mod messages;

pub use handler::{spawn, FetchWorker, WorkerHandle};
pub use messages::{FetchOperation, FetchRequest, FetchResponse};
