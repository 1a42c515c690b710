//! Input mode and route state types for the application.
//!
//! This module defines the enums that control keybinding interpretation and
//! which page of the application is shown. Together with the pagination
//! controller these form the whole mode surface of the app.
//!
//! # State Machine
//!
//! The application operates in one of two primary input modes:
//! - **Normal**: Default navigation and command mode
//! - **Search**: Active search with typing or result navigation focus
//!
//! Routes mirror the two client-visible pages of the original system:
//! - **List**: Root listing with search, infinite scroll, and comments overlay
//! - **Detail**: Per-post page parameterized by post id

use crate::domain::{Comment, Post};

/// Focus state within search mode.
///
/// Determines whether search input is being typed or filtered results are
/// being navigated. Controls which keybindings are active during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through filtered results.
    ///
    /// Accepts j/k for movement, enter to open comments, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and whether the search bar renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search mode with focus state.
    ///
    /// Contains a [`SearchFocus`] variant indicating whether the user is typing
    /// or navigating results.
    Search(SearchFocus),
}

/// Loading progress of the detail route.
///
/// The detail page issues one combined fetch (post by id, then its comments).
/// Until the response arrives the page shows a loading hint; a not-found
/// response is remembered so the page can render its one user-visible error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    /// Fetch issued, nothing to show yet.
    Loading,
    /// Post and comments arrived.
    Loaded { post: Post, comments: Vec<Comment> },
    /// The item endpoint reported the id as not found.
    NotFound,
}

/// Which page of the application is currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Root listing route: post table, search, pagination, comments overlay.
    List,

    /// Per-post detail route, parameterized by post id.
    ///
    /// The accumulated list state survives underneath; returning to the list
    /// restores it without refetching.
    Detail { id: u64, state: DetailState },
}

/// Comments overlay shown on top of the list route.
///
/// Created only when the comments fetch for the selected post has completed
/// (fetch-then-reveal); discarded wholesale on close. Comments are never
/// cached across opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// The post the overlay was opened for.
    pub post: Post,
    /// Comments fetched for that post; may be empty.
    pub comments: Vec<Comment>,
    /// Index of the first comment shown in the overlay panel.
    pub scroll: usize,
}

impl Overlay {
    /// Creates an overlay for a post with its freshly fetched comments.
    #[must_use]
    pub fn new(post: Post, comments: Vec<Comment>) -> Self {
        Self {
            post,
            comments,
            scroll: 0,
        }
    }

    /// Scrolls the comment panel down one comment, stopping at the last.
    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.comments.len() {
            self.scroll += 1;
        }
    }

    /// Scrolls the comment panel up one comment, stopping at the first.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
