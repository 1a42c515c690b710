//! Actions representing side effects to be executed by the frontend.
//!
//! This module defines the [`Action`] type, which represents imperative
//! commands produced by the event handler after processing user input or
//! worker responses. Actions bridge pure state transformations and effectful
//! operations like issuing fetches or shutting down the terminal.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The binary's event
//! loop executes them in sequence.

use crate::worker::FetchRequest;

/// Commands representing side effects to be executed by the event loop.
///
/// Actions are produced by the event handler and executed by the frontend.
/// They are the boundary between pure state transitions and effectful
/// operations; the reducer itself never touches the network or the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Exits the application, restoring the terminal on the way out.
    Quit,

    /// Posts a fetch request to the background worker thread.
    ///
    /// Enables asynchronous network operations without blocking the event
    /// loop. The matching response re-enters the reducer as
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(FetchRequest),
}
