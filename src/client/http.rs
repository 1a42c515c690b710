//! HTTP implementation of the remote post source.
//!
//! This module implements [`PostSource`] over a JSONPlaceholder-style REST API
//! using `reqwest`. Endpoints:
//!
//! - `GET {base}/posts?_limit={limit}&_page={page}`: paginated post list
//! - `GET {base}/posts/{id}`: single post, 404 when absent
//! - `GET {base}/comments?postId={id}`: comments for a post
//!
//! Non-success statuses map to [`PostdeckError::Status`], undecodable bodies
//! to [`PostdeckError::Decode`]. A 404 on the item endpoint is the one status
//! with meaning of its own: it becomes `Ok(None)`, the not-found indication
//! the detail route renders as "post does not exist".

use crate::domain::error::{PostdeckError, Result};
use crate::domain::{Comment, Post};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::source::PostSource;

/// Default remote API. Public demo instance serving 100 posts and their comments.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Reqwest-backed post source for JSONPlaceholder-style APIs.
///
/// Holds a shared connection pool via `reqwest::Client`. The base URL is
/// configurable so tests can point it at a local mock server.
#[derive(Debug, Clone)]
pub struct HttpPostSource {
    client: Client,
    base_url: String,
}

impl HttpPostSource {
    /// Creates a source against the given base URL.
    ///
    /// A trailing slash on `base_url` is stripped so endpoint paths can be
    /// joined with a plain `/`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Returns the configured base URL (without trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET request and decodes the JSON body into `T`.
    ///
    /// Status handling is shared across endpoints; the caller layers any
    /// endpoint-specific semantics (like 404-as-None) before calling this.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "non-success response");
            return Err(PostdeckError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PostdeckError::Decode(format!("{url}: {e}")))
    }
}

impl Default for HttpPostSource {
    /// Returns a source pointed at the public demo API.
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_page(&self, limit: u32, page: u32) -> Result<Vec<Post>> {
        let url = format!("{}/posts?_limit={limit}&_page={page}", self.base_url);
        tracing::debug!(url = %url, page = page, "fetching post page");

        let posts: Vec<Post> = self.get_json(&url).await?;
        tracing::debug!(page = page, count = posts.len(), "post page fetched");
        Ok(posts)
    }

    async fn fetch_post(&self, id: u64) -> Result<Option<Post>> {
        let url = format!("{}/posts/{id}", self.base_url);
        tracing::debug!(url = %url, post_id = id, "fetching post");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(post_id = id, "post not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PostdeckError::Status(status.as_u16()));
        }

        let post = response
            .json::<Post>()
            .await
            .map_err(|e| PostdeckError::Decode(format!("{url}: {e}")))?;
        Ok(Some(post))
    }

    async fn fetch_comments(&self, post_id: u64) -> Result<Vec<Comment>> {
        let url = format!("{}/comments?postId={post_id}", self.base_url);
        tracing::debug!(url = %url, post_id = post_id, "fetching comments");

        let comments: Vec<Comment> = self.get_json(&url).await?;
        tracing::debug!(post_id = post_id, count = comments.len(), "comments fetched");
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let source = HttpPostSource::new("http://localhost:8080///");
        assert_eq!(source.base_url(), "http://localhost:8080");
    }

    #[test]
    fn default_points_at_demo_api() {
        let source = HttpPostSource::default();
        assert_eq!(source.base_url(), DEFAULT_BASE_URL);
    }
}
