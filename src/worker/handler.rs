//! Background fetch worker running network I/O off the event loop.
//!
//! This module implements the worker thread that performs all remote fetches
//! so the terminal event loop never blocks on the network. The worker owns the
//! [`PostSource`] and a single-threaded tokio runtime; requests arrive over a
//! channel, are processed strictly in order, and each produces exactly one
//! response.
//!
//! There is no cancellation: once issued, a fetch runs to completion and its
//! response is delivered even if the UI has navigated away. The reducer is
//! responsible for dropping or idempotently applying stale responses.

use crate::client::PostSource;
use crate::domain::error::{PostdeckError, Result};
use crate::worker::{FetchOperation, FetchRequest, FetchResponse};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

/// Fetch worker state: the remote source behind the trait seam.
///
/// The request-handling core is synchronous-free and runtime-agnostic; the
/// surrounding thread drives it with `block_on`, and tests call
/// [`handle_request`](Self::handle_request) directly under `#[tokio::test]`.
pub struct FetchWorker {
    source: Box<dyn PostSource>,
}

impl FetchWorker {
    /// Creates a worker over the given post source.
    #[must_use]
    pub fn new(source: Box<dyn PostSource>) -> Self {
        Self { source }
    }

    /// Processes a single fetch request into its response.
    ///
    /// Errors never escape: every failure is folded into
    /// [`FetchResponse::Failed`] so the event loop always receives exactly one
    /// response per request.
    pub async fn handle_request(&self, request: FetchRequest) -> FetchResponse {
        let operation = request.operation();
        let span = tracing::debug_span!(
            "worker_handle_request",
            operation = operation.name(),
            request = ?request
        );
        let _guard = span.entered();

        match request {
            FetchRequest::Page { page, limit } => {
                match self.source.fetch_page(limit, page).await {
                    Ok(posts) => {
                        tracing::debug!(page = page, count = posts.len(), "page fetch complete");
                        FetchResponse::PageLoaded { page, posts }
                    }
                    Err(e) => Self::failed(operation, &e, Some(page)),
                }
            }

            FetchRequest::Comments { post_id } => {
                match self.source.fetch_comments(post_id).await {
                    Ok(comments) => {
                        tracing::debug!(
                            post_id = post_id,
                            count = comments.len(),
                            "comments fetch complete"
                        );
                        FetchResponse::CommentsLoaded { post_id, comments }
                    }
                    Err(e) => Self::failed(operation, &e, None),
                }
            }

            FetchRequest::Detail { id } => match self.source.fetch_post(id).await {
                Ok(None) => {
                    tracing::debug!(post_id = id, "detail fetch: post not found");
                    FetchResponse::DetailLoaded {
                        id,
                        post: None,
                        comments: vec![],
                    }
                }
                Ok(Some(post)) => {
                    // A comments failure degrades to an empty panel; the post
                    // itself still renders.
                    let comments = match self.source.fetch_comments(id).await {
                        Ok(comments) => comments,
                        Err(e) => {
                            tracing::warn!(post_id = id, error = %e, "detail comments fetch failed");
                            vec![]
                        }
                    };
                    FetchResponse::DetailLoaded {
                        id,
                        post: Some(post),
                        comments,
                    }
                }
                Err(e) => Self::failed(operation, &e, None),
            },
        }
    }

    /// Builds a failure response with consistent logging.
    fn failed(operation: FetchOperation, error: &PostdeckError, page: Option<u32>) -> FetchResponse {
        tracing::warn!(operation = operation.name(), error = %error, "fetch operation failed");
        FetchResponse::Failed {
            operation,
            message: error.to_string(),
            page,
        }
    }
}

/// Handle to a running fetch worker thread.
///
/// Requests are posted fire-and-forget; responses are drained from the event
/// loop via [`try_recv`](Self::try_recv) between input polls. Dropping the
/// handle closes the request channel, which lets the worker thread finish its
/// current request and exit.
pub struct WorkerHandle {
    request_tx: Sender<FetchRequest>,
    response_rx: Receiver<FetchResponse>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Posts a fetch request to the worker.
    ///
    /// # Errors
    ///
    /// Returns [`PostdeckError::Worker`] if the worker thread has exited and
    /// its channel is closed.
    pub fn post(&self, request: FetchRequest) -> Result<()> {
        tracing::debug!(request = ?request, "posting request to worker");
        self.request_tx
            .send(request)
            .map_err(|e| PostdeckError::Worker(format!("worker channel closed: {e}")))
    }

    /// Takes the next completed response, if one is ready.
    ///
    /// Non-blocking; returns `None` both when no response is pending and when
    /// the worker has shut down.
    #[must_use]
    pub fn try_recv(&self) -> Option<FetchResponse> {
        match self.response_rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Closes the request channel and waits for the worker thread to exit.
    ///
    /// The sender must be dropped before joining, otherwise the worker blocks
    /// in `recv` forever.
    pub fn shutdown(self) {
        let Self {
            request_tx,
            response_rx,
            thread,
        } = self;
        drop(request_tx);
        drop(response_rx);
        if let Some(thread) = thread {
            let _ = thread.join();
        }
    }
}

/// Spawns the fetch worker on a dedicated thread.
///
/// The thread owns a current-thread tokio runtime and processes requests
/// sequentially, matching the single-fetch-in-flight discipline the
/// pagination controller enforces upstream.
///
/// # Errors
///
/// Returns [`PostdeckError::Worker`] if the tokio runtime cannot be built.
pub fn spawn(source: Box<dyn PostSource>) -> Result<WorkerHandle> {
    let (request_tx, request_rx) = std::sync::mpsc::channel::<FetchRequest>();
    let (response_tx, response_rx) = std::sync::mpsc::channel::<FetchResponse>();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| PostdeckError::Worker(format!("failed to build runtime: {e}")))?;

    let thread = std::thread::Builder::new()
        .name("postdeck-fetch".to_string())
        .spawn(move || {
            let worker = FetchWorker::new(source);
            while let Ok(request) = request_rx.recv() {
                let response = runtime.block_on(worker.handle_request(request));
                if response_tx.send(response).is_err() {
                    tracing::debug!("event loop gone, worker exiting");
                    break;
                }
            }
            tracing::debug!("fetch worker thread exiting");
        })
        .map_err(|e| PostdeckError::Worker(format!("failed to spawn worker thread: {e}")))?;

    Ok(WorkerHandle {
        request_tx,
        response_rx,
        thread: Some(thread),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Comment, Post, PostdeckError};
    use async_trait::async_trait;

    /// In-memory source with scripted results.
    struct ScriptedSource {
        pages: Vec<Vec<Post>>,
        post: Option<Post>,
        comments_fail: bool,
    }

    fn post(id: u64) -> Post {
        Post {
            id,
            title: format!("post {id}"),
            body: String::new(),
        }
    }

    fn comment(id: u64) -> Comment {
        Comment {
            id,
            name: "n".to_string(),
            email: "e@x.io".to_string(),
            body: "b".to_string(),
        }
    }

    #[async_trait]
    impl crate::client::PostSource for ScriptedSource {
        async fn fetch_page(&self, _limit: u32, page: u32) -> crate::domain::Result<Vec<Post>> {
            self.pages
                .get(page as usize - 1)
                .cloned()
                .ok_or_else(|| PostdeckError::Status(500))
        }

        async fn fetch_post(&self, _id: u64) -> crate::domain::Result<Option<Post>> {
            Ok(self.post.clone())
        }

        async fn fetch_comments(&self, post_id: u64) -> crate::domain::Result<Vec<Comment>> {
            if self.comments_fail {
                Err(PostdeckError::Status(503))
            } else {
                Ok(vec![comment(post_id * 10)])
            }
        }
    }

    fn worker(source: ScriptedSource) -> FetchWorker {
        FetchWorker::new(Box::new(source))
    }

    #[tokio::test]
    async fn page_request_yields_page_response() {
        let w = worker(ScriptedSource {
            pages: vec![vec![post(1), post(2)]],
            post: None,
            comments_fail: false,
        });

        let response = w
            .handle_request(FetchRequest::Page { page: 1, limit: 12 })
            .await;
        match response {
            FetchResponse::PageLoaded { page, posts } => {
                assert_eq!(page, 1);
                assert_eq!(posts.len(), 2);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn page_failure_carries_page_number() {
        let w = worker(ScriptedSource {
            pages: vec![],
            post: None,
            comments_fail: false,
        });

        let response = w
            .handle_request(FetchRequest::Page { page: 3, limit: 12 })
            .await;
        match response {
            FetchResponse::Failed { operation, page, .. } => {
                assert_eq!(operation, FetchOperation::Page);
                assert_eq!(page, Some(3));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn detail_for_missing_post_reports_none() {
        let w = worker(ScriptedSource {
            pages: vec![],
            post: None,
            comments_fail: false,
        });

        let response = w.handle_request(FetchRequest::Detail { id: 9 }).await;
        assert_eq!(
            response,
            FetchResponse::DetailLoaded { id: 9, post: None, comments: vec![] }
        );
    }

    #[tokio::test]
    async fn detail_comments_failure_degrades_to_empty_panel() {
        let w = worker(ScriptedSource {
            pages: vec![],
            post: Some(post(9)),
            comments_fail: true,
        });

        let response = w.handle_request(FetchRequest::Detail { id: 9 }).await;
        match response {
            FetchResponse::DetailLoaded { id, post, comments } => {
                assert_eq!(id, 9);
                assert!(post.is_some());
                assert!(comments.is_empty());
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn spawned_worker_round_trips_a_request() {
        let handle = spawn(Box::new(ScriptedSource {
            pages: vec![vec![post(1)]],
            post: None,
            comments_fail: false,
        }))
        .unwrap();

        handle.post(FetchRequest::Page { page: 1, limit: 12 }).unwrap();

        let response = loop {
            if let Some(response) = handle.try_recv() {
                break response;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert!(matches!(response, FetchResponse::PageLoaded { page: 1, .. }));
    }
}
