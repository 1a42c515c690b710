//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like highlight ranges and selection
//! state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data. The
//! list route fills `display_items`; the detail route fills `detail` and
//! leaves the table empty; the comments overlay rides along in `overlay`
//! whichever way the table looks underneath.

use crate::domain::Comment;

/// Message shown in the comments panel when a post has no comments.
pub const NO_COMMENTS_MESSAGE: &str = "No comments yet";

/// Message shown on the detail page when the requested post id does not exist.
pub const POST_NOT_FOUND_MESSAGE: &str = "This post does not exist";

/// Complete UI view model for rendering.
///
/// Contains all display information needed to render one frame. The view
/// model is computed from `AppState` and includes pre-processed display items,
/// selection state, and optional UI elements like search bars, the comments
/// overlay, and the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Visible window of post rows for the table.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Header information (title, counts).
    pub header: HeaderInfo,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Optional empty state message (loading, no posts, no matches).
    pub empty_state: Option<EmptyState>,

    /// Optional search bar information (when in search mode).
    pub search_bar: Option<SearchBarInfo>,

    /// Comments overlay floating above the list, if open.
    pub overlay: Option<OverlayView>,

    /// Detail page content; set only on the detail route.
    pub detail: Option<DetailPage>,
}

/// Display information for a single post row.
///
/// Represents one row in the table view. Contains pre-computed highlight
/// ranges for search match rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    /// Post id, shown in the leading column.
    pub id: u64,

    /// Post title.
    pub title: String,

    /// Whitespace-flattened body excerpt for the secondary column.
    pub excerpt: String,

    /// Whether this row is currently selected.
    pub is_selected: bool,

    /// Character ranges of the title to highlight (search matches).
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
///
/// Contains help text and keybinding hints for the bottom of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit | /: search").
    pub keybindings: String,
}

/// Empty state message display information.
///
/// Shown when the table has no rows: before the first page arrives, when the
/// API returns nothing, or when the search filter matches no titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No posts match that title").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}

/// Comments overlay content.
///
/// Built only once the comments fetch for the selected post has completed, so
/// the overlay never renders half-loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    /// Title of the post the overlay was opened for.
    pub title: String,

    /// Full post body.
    pub body: String,

    /// Comments for the post; may be empty.
    pub comments: Vec<CommentView>,

    /// Index of the first comment to render (j/k scrolling).
    pub scroll: usize,
}

/// Display information for a single comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    /// Commenter display name.
    pub name: String,

    /// Commenter email address.
    pub email: String,

    /// Comment body text.
    pub body: String,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            name: comment.name.clone(),
            email: comment.email.clone(),
            body: comment.body.clone(),
        }
    }
}

/// Detail page content for the per-post route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPage {
    /// Fetch in flight; render a loading hint.
    Loading,

    /// The id does not exist; render [`POST_NOT_FOUND_MESSAGE`].
    NotFound,

    /// Post and comments ready to render.
    Loaded {
        title: String,
        body: String,
        comments: Vec<CommentView>,
    },
}
