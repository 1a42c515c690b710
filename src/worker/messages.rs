//! Fetch worker message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the event
//! loop and the background worker thread that performs all network I/O. Each
//! request names one remote operation; each response carries the decoded
//! result back into the reducer.
//!
//! Unlike a wire protocol these types cross an in-process channel, so they are
//! plain enums carrying domain values rather than serialized payloads.

use crate::domain::{Comment, Post};

/// Requests sent from the event loop to the fetch worker.
///
/// Each variant corresponds to one remote operation. Requests are processed
/// strictly in order; there is no cancellation, so a response may arrive for
/// a request the UI has since navigated away from (the reducer drops such
/// responses or applies them idempotently).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Fetch one page of posts from the list endpoint.
    Page {
        /// Page number to fetch (1-based).
        page: u32,
        /// Page size passed as the `_limit` query parameter.
        limit: u32,
    },

    /// Fetch the comments belonging to a post, for the overlay.
    Comments {
        /// Id of the post whose comments are requested.
        post_id: u64,
    },

    /// Fetch a post by id plus its comments, for the detail route.
    Detail {
        /// Id of the post to fetch.
        id: u64,
    },
}

impl FetchRequest {
    /// The operation this request performs.
    #[must_use]
    pub const fn operation(&self) -> FetchOperation {
        match self {
            Self::Page { .. } => FetchOperation::Page,
            Self::Comments { .. } => FetchOperation::Comments,
            Self::Detail { .. } => FetchOperation::Detail,
        }
    }
}

/// Identifies which remote operation a failure response belongs to.
///
/// Carried in [`FetchResponse::Failed`] so the reducer releases only the
/// in-flight state owned by the failed operation: a page failure re-arms the
/// pager, a comments failure drops the pending overlay, and neither touches
/// the other's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOperation {
    /// A page fetch for the post list.
    Page,
    /// A comments fetch for the overlay.
    Comments,
    /// A post-plus-comments fetch for the detail route.
    Detail,
}

impl FetchOperation {
    /// Short operation name used in log events.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Page => "fetch page",
            Self::Comments => "fetch comments",
            Self::Detail => "fetch detail",
        }
    }
}

/// Responses sent from the fetch worker back to the event loop.
///
/// Each variant corresponds to the completion of one request, either with
/// decoded data or with an error description. Errors carry the operation so
/// the reducer can release exactly the matching in-flight state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    /// A page of posts arrived. An empty vector means the remote had no data
    /// for that page.
    PageLoaded {
        /// Page number the posts belong to.
        page: u32,
        /// The decoded posts, in remote order.
        posts: Vec<Post>,
    },

    /// Comments for an overlay arrived; may be empty.
    CommentsLoaded {
        /// Id of the post the comments belong to.
        post_id: u64,
        /// The decoded comments, in remote order.
        comments: Vec<Comment>,
    },

    /// A detail fetch completed. `post` is `None` when the item endpoint
    /// reported the id as not found; comments are empty in that case.
    DetailLoaded {
        /// Id the detail fetch was issued for.
        id: u64,
        /// The post, or `None` if it does not exist.
        post: Option<Post>,
        /// Comments for the post; empty when the post is absent.
        comments: Vec<Comment>,
    },

    /// A request failed. The UI degrades to silent inaction; the reducer only
    /// releases in-flight state and logs the message.
    Failed {
        /// The operation that failed.
        operation: FetchOperation,
        /// Human-readable error message.
        message: String,
        /// Page number, when the failed request was a page fetch.
        page: Option<u32>,
    },
}
