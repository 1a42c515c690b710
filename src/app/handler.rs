//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! worker responses, translating them into state changes and action sequences.
//! It is the primary control flow coordinator for the application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the terminal frontend or the fetch worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! The handler itself performs no I/O, so pagination, overlay opening, and
//! detail navigation are all exercised headlessly in tests.
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Lifecycle**: `Start`
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenComments`, `OpenDetail`,
//!   `CloseOverlay`, `BackToList`, `Quit`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Mode Switching**: `SearchMode`, `FocusSearchBar`, `FocusResults`,
//!   `ExitSearch`
//! - **Pagination**: `LoadMore` (the frontend's visibility-sensor trigger)
//! - **Worker**: `WorkerResponse` with typed message variants

use crate::app::modes::{DetailState, InputMode, Overlay, Route, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::{FetchOperation, FetchRequest, FetchResponse};

/// Events triggered by user input, lifecycle, or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Application started; issues the initial page fetch.
    Start,
    /// Moves the selection cursor down one row (or scrolls the overlay).
    KeyDown,
    /// Moves the selection cursor up one row (or scrolls the overlay).
    KeyUp,
    /// Exits the application.
    Quit,

    /// Requests the comments overlay for the selected post.
    ///
    /// The overlay opens only when the comments response arrives; until then
    /// the post is held as pending.
    OpenComments,
    /// Closes the comments overlay, discarding its post and comments.
    CloseOverlay,
    /// Navigates to the detail route for the selected post.
    OpenDetail,
    /// Returns from the detail route to the list, which survives untouched.
    BackToList,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating focus).
    FocusSearchBar,
    /// Focuses the filtered results (from typing focus).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Clears the search query and returns to normal mode.
    Escape,

    /// Load-more trigger: the last rendered list item became visible.
    ///
    /// Emitted by the frontend after a render leaves the selection on the
    /// last filtered row. Ignored while a page fetch is already in flight.
    LoadMore,

    /// Wraps a response from the background fetch worker.
    WorkerResponse(FetchResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// This is the primary event handler coordinating all state transitions and
/// side effects. It pattern-matches on event types, calls state mutation
/// methods, and collects actions to be executed by the event loop.
///
/// # Returns
///
/// A tuple of (`should_render`, actions). `should_render` is true when the
/// event changed something visible; the action vector may be empty.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` keeps the signature stable
/// for state mutations that may fail in the future.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Start => {
            let Some(page) = state.pager.begin_initial() else {
                tracing::debug!("initial fetch already pending, ignoring start");
                return Ok((false, vec![]));
            };
            tracing::debug!(page = page, limit = state.page_size, "issuing initial page fetch");
            Ok((
                true,
                vec![Action::PostToWorker(FetchRequest::Page {
                    page,
                    limit: state.page_size,
                })],
            ))
        }

        Event::KeyDown => {
            if let Some(overlay) = state.overlay.as_mut() {
                overlay.scroll_down();
            } else {
                state.move_selection_down();
            }
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if let Some(overlay) = state.overlay.as_mut() {
                overlay.scroll_up();
            } else {
                state.move_selection_up();
            }
            Ok((true, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),

        Event::OpenComments => {
            if state.overlay.is_some() || state.pending_overlay.is_some() {
                tracing::debug!("overlay already open or pending, ignoring");
                return Ok((false, vec![]));
            }
            let Some(post) = state.selected_post() else {
                tracing::debug!("no post selected for comments");
                return Ok((false, vec![]));
            };

            let post = post.clone();
            tracing::debug!(post_id = post.id, "requesting comments for overlay");
            let request = FetchRequest::Comments { post_id: post.id };
            state.pending_overlay = Some(post);
            Ok((false, vec![Action::PostToWorker(request)]))
        }
        Event::CloseOverlay => {
            if state.overlay.take().is_none() && state.pending_overlay.take().is_none() {
                return Ok((false, vec![]));
            }
            tracing::debug!("comments overlay closed");
            Ok((true, vec![]))
        }

        Event::OpenDetail => {
            let Some(post) = state.selected_post() else {
                tracing::debug!("no post selected for detail");
                return Ok((false, vec![]));
            };
            let id = post.id;
            tracing::debug!(post_id = id, "navigating to detail route");

            state.overlay = None;
            state.pending_overlay = None;
            state.route = Route::Detail {
                id,
                state: DetailState::Loading,
            };
            Ok((true, vec![Action::PostToWorker(FetchRequest::Detail { id })]))
        }
        Event::BackToList => {
            if state.route == Route::List {
                return Ok((false, vec![]));
            }
            tracing::debug!("returning to list route");
            state.route = Route::List;
            Ok((true, vec![]))
        }

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query = String::new();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                state.apply_search_filter();
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            state.input_mode = InputMode::Normal;
            state.search_query = String::new();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, "search query updated");
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.search_query.pop();
            state.apply_search_filter();
            Ok((true, vec![]))
        }

        Event::LoadMore => {
            if state.route != Route::List || !state.initial_loaded {
                return Ok((false, vec![]));
            }
            let Some(page) = state.pager.try_begin() else {
                return Ok((false, vec![]));
            };
            Ok((
                false,
                vec![Action::PostToWorker(FetchRequest::Page {
                    page,
                    limit: state.page_size,
                })],
            ))
        }

        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

/// Applies a fetch worker response to the application state.
///
/// Stale responses (for a post the user has navigated away from) are dropped;
/// page responses are applied as-is since appends are idempotent enough for
/// this design. Failures release in-flight state and are otherwise silent.
fn handle_worker_response(
    state: &mut AppState,
    response: &FetchResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        FetchResponse::PageLoaded { page, posts } => {
            state.pager.complete();
            tracing::debug!(page = page, count = posts.len(), "page response applied");

            if *page == 1 && !state.initial_loaded {
                state.replace_all(posts.clone());
            } else {
                state.append_page(posts.clone());
            }
            Ok((true, vec![]))
        }

        FetchResponse::CommentsLoaded { post_id, comments } => {
            let Some(pending) = state.pending_overlay.take() else {
                tracing::debug!(post_id = post_id, "comments arrived with no pending overlay");
                return Ok((false, vec![]));
            };
            if pending.id != *post_id {
                tracing::debug!(
                    expected = pending.id,
                    got = post_id,
                    "stale comments response dropped"
                );
                return Ok((false, vec![]));
            }

            tracing::debug!(post_id = post_id, count = comments.len(), "opening comments overlay");
            state.overlay = Some(Overlay::new(pending, comments.clone()));
            Ok((true, vec![]))
        }

        FetchResponse::DetailLoaded { id, post, comments } => {
            let Route::Detail { id: current, state: detail } = &mut state.route else {
                tracing::debug!(post_id = id, "detail response with list route, dropped");
                return Ok((false, vec![]));
            };
            if current != id {
                tracing::debug!(expected = *current, got = *id, "stale detail response dropped");
                return Ok((false, vec![]));
            }

            *detail = match post {
                Some(post) => DetailState::Loaded {
                    post: post.clone(),
                    comments: comments.clone(),
                },
                None => DetailState::NotFound,
            };
            Ok((true, vec![]))
        }

        FetchResponse::Failed { operation, message, page } => {
            tracing::warn!(operation = operation.name(), page = ?page, error = %message, "fetch failed");

            // Only the failed operation's in-flight state is released; a page
            // failure must not cancel an unrelated pending overlay.
            match operation {
                FetchOperation::Page => state.pager.complete(),
                // A failed comments fetch leaves the overlay unopened.
                FetchOperation::Comments => state.pending_overlay = None,
                // A failed detail fetch leaves the page loading.
                FetchOperation::Detail => {}
            }
            Ok((false, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Post;
    use crate::ui::theme::Theme;
    use crate::ui::viewmodel::DetailPage;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: format!("body {id}"),
        }
    }

    fn started_state(posts: Vec<Post>) -> AppState {
        let mut state = AppState::new(Theme::default(), 12);
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        assert_eq!(actions.len(), 1);
        apply_response(
            &mut state,
            FetchResponse::PageLoaded { page: 1, posts },
        );
        state
    }

    fn apply_response(state: &mut AppState, response: FetchResponse) -> Vec<Action> {
        handle_event(state, &Event::WorkerResponse(response))
            .unwrap()
            .1
    }

    fn fetch_actions(actions: &[Action]) -> Vec<&FetchRequest> {
        actions
            .iter()
            .map(|a| match a {
                Action::PostToWorker(req) => req,
                Action::Quit => panic!("unexpected quit"),
            })
            .collect()
    }

    #[test]
    fn start_issues_single_initial_fetch() {
        let mut state = AppState::new(Theme::default(), 12);
        let (_, first) = handle_event(&mut state, &Event::Start).unwrap();
        assert_eq!(
            fetch_actions(&first),
            vec![&FetchRequest::Page { page: 1, limit: 12 }]
        );

        // A second start while the fetch is pending issues nothing.
        let (_, second) = handle_event(&mut state, &Event::Start).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn initial_page_replaces_later_pages_append() {
        let mut state = started_state(vec![post(1, "a")]);
        assert_eq!(state.posts.len(), 1);

        handle_event(&mut state, &Event::LoadMore).unwrap();
        apply_response(
            &mut state,
            FetchResponse::PageLoaded {
                page: 2,
                posts: vec![post(2, "b")],
            },
        );
        assert_eq!(state.posts.len(), 2);
    }

    #[test]
    fn rapid_load_more_triggers_one_fetch() {
        let mut state = started_state(vec![post(1, "a")]);

        let (_, first) = handle_event(&mut state, &Event::LoadMore).unwrap();
        let (_, second) = handle_event(&mut state, &Event::LoadMore).unwrap();

        assert_eq!(
            fetch_actions(&first),
            vec![&FetchRequest::Page { page: 2, limit: 12 }]
        );
        assert!(second.is_empty());
    }

    #[test]
    fn load_more_before_initial_page_is_ignored() {
        let mut state = AppState::new(Theme::default(), 12);
        handle_event(&mut state, &Event::Start).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn empty_page_does_not_stop_future_triggers() {
        // Preserved upstream behavior: an empty page is not a terminal
        // end-of-data signal, so the next trigger fetches again.
        let mut state = started_state(vec![post(1, "a")]);

        handle_event(&mut state, &Event::LoadMore).unwrap();
        apply_response(&mut state, FetchResponse::PageLoaded { page: 2, posts: vec![] });
        assert_eq!(state.posts.len(), 1);

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert_eq!(
            fetch_actions(&actions),
            vec![&FetchRequest::Page { page: 3, limit: 12 }]
        );
    }

    #[test]
    fn failed_page_fetch_rearms_pagination() {
        let mut state = started_state(vec![post(1, "a")]);

        handle_event(&mut state, &Event::LoadMore).unwrap();
        apply_response(
            &mut state,
            FetchResponse::Failed {
                operation: FetchOperation::Page,
                message: "connection refused".to_string(),
                page: Some(2),
            },
        );

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn overlay_opens_only_after_comments_arrive() {
        let mut state = started_state(vec![post(5, "a")]);

        let (_, actions) = handle_event(&mut state, &Event::OpenComments).unwrap();
        assert_eq!(
            fetch_actions(&actions),
            vec![&FetchRequest::Comments { post_id: 5 }]
        );
        assert!(state.overlay.is_none(), "overlay must wait for the fetch");

        apply_response(
            &mut state,
            FetchResponse::CommentsLoaded { post_id: 5, comments: vec![] },
        );
        let overlay = state.overlay.as_ref().expect("overlay should be open");
        assert_eq!(overlay.post.id, 5);
        assert!(overlay.comments.is_empty());
    }

    #[test]
    fn empty_comments_still_produce_an_overlay_view() {
        let mut state = started_state(vec![post(5, "a")]);
        handle_event(&mut state, &Event::OpenComments).unwrap();
        apply_response(
            &mut state,
            FetchResponse::CommentsLoaded { post_id: 5, comments: vec![] },
        );

        let vm = state.compute_viewmodel(24, 80);
        let overlay = vm.overlay.expect("overlay view expected");
        assert_eq!(overlay.title, "a");
        // The comments component renders its placeholder from this.
        assert!(overlay.comments.is_empty());
    }

    #[test]
    fn failed_comments_fetch_leaves_overlay_unopened() {
        let mut state = started_state(vec![post(5, "a")]);
        handle_event(&mut state, &Event::OpenComments).unwrap();

        apply_response(
            &mut state,
            FetchResponse::Failed {
                operation: FetchOperation::Comments,
                message: "timeout".to_string(),
                page: None,
            },
        );
        assert!(state.overlay.is_none());
        assert!(state.pending_overlay.is_none());

        // The user can try again afterwards.
        let (_, actions) = handle_event(&mut state, &Event::OpenComments).unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn page_failure_does_not_cancel_pending_overlay() {
        // The worker is sequential: a comments fetch queued behind a failing
        // page fetch still completes, and its overlay must still open.
        let mut state = started_state(vec![post(5, "a")]);

        handle_event(&mut state, &Event::LoadMore).unwrap();
        handle_event(&mut state, &Event::OpenComments).unwrap();

        apply_response(
            &mut state,
            FetchResponse::Failed {
                operation: FetchOperation::Page,
                message: "connection refused".to_string(),
                page: Some(2),
            },
        );
        assert!(state.pending_overlay.is_some());

        apply_response(
            &mut state,
            FetchResponse::CommentsLoaded { post_id: 5, comments: vec![] },
        );
        let overlay = state.overlay.as_ref().expect("overlay should still open");
        assert_eq!(overlay.post.id, 5);
    }

    #[test]
    fn comments_failure_does_not_rearm_pagination() {
        let mut state = started_state(vec![post(5, "a")]);

        handle_event(&mut state, &Event::LoadMore).unwrap();
        handle_event(&mut state, &Event::OpenComments).unwrap();

        apply_response(
            &mut state,
            FetchResponse::Failed {
                operation: FetchOperation::Comments,
                message: "timeout".to_string(),
                page: None,
            },
        );

        // The page fetch is still in flight, so no new trigger fires.
        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_comments_for_other_post_are_dropped() {
        let mut state = started_state(vec![post(5, "a")]);
        handle_event(&mut state, &Event::OpenComments).unwrap();

        apply_response(
            &mut state,
            FetchResponse::CommentsLoaded { post_id: 99, comments: vec![] },
        );
        assert!(state.overlay.is_none());
    }

    #[test]
    fn close_overlay_discards_comments() {
        let mut state = started_state(vec![post(5, "a")]);
        handle_event(&mut state, &Event::OpenComments).unwrap();
        apply_response(
            &mut state,
            FetchResponse::CommentsLoaded { post_id: 5, comments: vec![] },
        );

        handle_event(&mut state, &Event::CloseOverlay).unwrap();
        assert!(state.overlay.is_none());
    }

    #[test]
    fn detail_not_found_renders_missing_post_page() {
        let mut state = started_state(vec![post(7, "a")]);

        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(matches!(
            state.route,
            Route::Detail { id: 7, state: DetailState::Loading }
        ));

        apply_response(
            &mut state,
            FetchResponse::DetailLoaded { id: 7, post: None, comments: vec![] },
        );

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.detail, Some(DetailPage::NotFound));
    }

    #[test]
    fn detail_loads_post_with_comments() {
        let mut state = started_state(vec![post(7, "seven")]);
        handle_event(&mut state, &Event::OpenDetail).unwrap();

        apply_response(
            &mut state,
            FetchResponse::DetailLoaded {
                id: 7,
                post: Some(post(7, "seven")),
                comments: vec![crate::domain::Comment {
                    id: 1,
                    name: "n".to_string(),
                    email: "e@x.io".to_string(),
                    body: "b".to_string(),
                }],
            },
        );

        match state.compute_viewmodel(24, 80).detail {
            Some(DetailPage::Loaded { title, comments, .. }) => {
                assert_eq!(title, "seven");
                assert_eq!(comments.len(), 1);
            }
            other => panic!("expected loaded detail, got {other:?}"),
        }
    }

    #[test]
    fn list_survives_detail_round_trip() {
        let mut state = started_state(vec![post(1, "Alpha"), post(2, "Beta")]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('a')).unwrap();
        handle_event(&mut state, &Event::Char('l')).unwrap();

        handle_event(&mut state, &Event::OpenDetail).unwrap();
        handle_event(&mut state, &Event::BackToList).unwrap();

        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.search_query, "al");
        assert_eq!(state.filtered_posts.len(), 1);
    }

    #[test]
    fn typing_outside_search_mode_is_ignored() {
        let mut state = started_state(vec![post(1, "a")]);
        let (rendered, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!rendered);
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn escape_clears_query_and_restores_list() {
        let mut state = started_state(vec![post(1, "Alpha"), post(2, "Beta")]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('z')).unwrap();
        assert!(state.filtered_posts.is_empty());

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filtered_posts.len(), 2);
    }

    #[test]
    fn quit_emits_quit_action() {
        let mut state = started_state(vec![post(1, "a")]);
        let (_, actions) = handle_event(&mut state, &Event::Quit).unwrap();
        assert_eq!(actions, vec![Action::Quit]);
    }
}
