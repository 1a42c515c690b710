//! Remote post source abstraction.
//!
//! This module defines the [`PostSource`] trait that abstracts over the remote
//! REST endpoint serving posts and comments. The fetch worker only talks to
//! this trait, which keeps the pagination state machine and the reducer fully
//! testable without a network.
//!
//! # Design Philosophy
//!
//! The trait is minimal and mirrors the three endpoints the application
//! actually uses, not a generic REST client. Each method maps directly to one
//! user-visible operation: loading a page, opening a detail view, loading
//! comments.

use crate::domain::error::Result;
use crate::domain::{Comment, Post};
use async_trait::async_trait;

/// Abstraction over the remote endpoint serving posts and comments.
///
/// # Implementations
///
/// - [`HttpPostSource`](crate::client::HttpPostSource): reqwest-based client
///   for JSONPlaceholder-style APIs (default)
/// - Test doubles implementing this trait directly
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetches one page of posts.
    ///
    /// An empty result means the remote has no more data for that page. Per
    /// the pagination design this is non-authoritative: later triggers may
    /// still attempt further pages.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// malformed response body.
    async fn fetch_page(&self, limit: u32, page: u32) -> Result<Vec<Post>>;

    /// Fetches a single post by id.
    ///
    /// Returns `Ok(None)` when the remote reports the post as not found.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status other than
    /// 404, or a malformed response body.
    async fn fetch_post(&self, id: u64) -> Result<Option<Post>>;

    /// Fetches all comments belonging to a post.
    ///
    /// An unknown post id yields an empty list, not an error; the comments
    /// endpoint filters by query parameter and has no not-found case.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// malformed response body.
    async fn fetch_comments(&self, post_id: u64) -> Result<Vec<Comment>>;
}
