//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! application, along with the post list store operations, search filtering,
//! selection management, and UI view model generation. It is the single source
//! of truth for all transient UI state.
//!
//! # Architecture
//!
//! `AppState` separates core data (the accumulated post list) from derived
//! state (filtered posts, selected index) to keep transitions simple. All
//! mutation happens through the event handler; view models are computed
//! on demand from state snapshots, so the whole layer runs headlessly in
//! tests without a terminal.
//!
//! # State Components
//!
//! - **Posts**: Accumulated sequence of posts, appended to as pages arrive
//! - **Filtered Posts**: Order-preserving subsequence matching the search query
//! - **Selection**: Cursor position within the filtered results
//! - **Pager**: Pagination controller (page cursor + in-flight flag)
//! - **Route / Overlay**: Which page is shown and whether comments float on top

use crate::app::modes::{DetailState, InputMode, Overlay, Route, SearchFocus};
use crate::app::pager::Pager;
use crate::domain::Post;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CommentView, DetailPage, DisplayItem, EmptyState, FooterInfo, HeaderInfo, OverlayView,
    SearchBarInfo, UIViewModel,
};

/// Central application state container.
///
/// Holds all transient UI state including the post list, search filter,
/// selection, pagination, and route information. Mutated by the event handler
/// in response to user input and worker responses.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Accumulated sequence of posts, in fetch order.
    ///
    /// Appended to as pages arrive; never mutated element-wise and never
    /// de-duplicated. Replaced wholesale only when the initial page lands.
    pub posts: Vec<Post>,

    /// Posts whose title matches the current search query.
    ///
    /// Always an order-preserving subsequence of `posts`. Recomputed by
    /// `apply_search_filter()` after every query or list change.
    pub filtered_posts: Vec<Post>,

    /// Zero-based index of the selected post within `filtered_posts`.
    ///
    /// Clamped to valid bounds by `apply_search_filter()`. Does not wrap:
    /// the bottom of the list doubles as the load-more sentinel.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Current search query string.
    ///
    /// Accumulated by `Char` events, reduced by `Backspace`, cleared by
    /// `ExitSearch` and `Escape`.
    pub search_query: String,

    /// Which page of the application is shown.
    pub route: Route,

    /// Comments overlay floating over the list route, if open.
    pub overlay: Option<Overlay>,

    /// Post whose comments fetch is pending for the overlay.
    ///
    /// Set when the user requests comments; the overlay opens only when the
    /// matching response arrives (fetch-then-reveal). Cleared on failure, so
    /// a failed fetch simply leaves the overlay unopened.
    pub pending_overlay: Option<Post>,

    /// Pagination controller for the list endpoint.
    pub pager: Pager,

    /// Whether the initial page has arrived at least once.
    ///
    /// The first successful page response replaces the list instead of
    /// appending to it.
    pub initial_loaded: bool,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Page size passed to the list endpoint.
    pub page_size: u32,
}

impl AppState {
    /// Creates a new application state with the given theme and page size.
    ///
    /// All collections start empty; the post list is populated by worker
    /// responses after the initial fetch is posted.
    #[must_use]
    pub fn new(theme: Theme, page_size: u32) -> Self {
        Self {
            posts: Vec::new(),
            filtered_posts: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            route: Route::List,
            overlay: None,
            pending_overlay: None,
            pager: Pager::new(),
            initial_loaded: false,
            theme,
            page_size,
        }
    }

    /// Replaces the entire post list with the initial page.
    ///
    /// Used only for the first page response; later pages append. Re-runs the
    /// search filter so the derived list stays consistent.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        tracing::debug!(count = posts.len(), "replacing post list with initial page");
        self.posts = posts;
        self.initial_loaded = true;
        self.apply_search_filter();
    }

    /// Appends a page of posts to the accumulated list.
    ///
    /// No de-duplication is performed; an empty page leaves the list
    /// unchanged. Re-runs the search filter afterwards.
    pub fn append_page(&mut self, posts: Vec<Post>) {
        if posts.is_empty() {
            tracing::debug!("empty page appended, list unchanged");
            return;
        }
        tracing::debug!(count = posts.len(), total = self.posts.len() + posts.len(), "appending page");
        self.posts.extend(posts);
        self.apply_search_filter();
    }

    /// Moves the selection cursor down by one position, stopping at the end.
    ///
    /// Deliberately non-wrapping: the last visible row doubles as the
    /// load-more sentinel, so running past it must leave the cursor there.
    pub fn move_selection_down(&mut self) {
        if self.filtered_posts.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1).min(self.filtered_posts.len() - 1);
    }

    /// Moves the selection cursor up by one position, stopping at the top.
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Returns a reference to the currently selected post, if any.
    #[must_use]
    pub fn selected_post(&self) -> Option<&Post> {
        self.filtered_posts.get(self.selected_index)
    }

    /// Returns true when the selection sits on the last filtered row.
    ///
    /// This is the load-more sentinel: the frontend emits a `LoadMore` event
    /// whenever a render leaves this condition true, mirroring a visibility
    /// sensor attached after the last rendered item.
    #[must_use]
    pub fn sentinel_visible(&self) -> bool {
        self.route == Route::List
            && self.initial_loaded
            && !self.filtered_posts.is_empty()
            && self.selected_index + 1 == self.filtered_posts.len()
    }

    /// Applies the search filter to the accumulated post list.
    ///
    /// A post passes iff its title contains the query as a case-insensitive
    /// substring; an empty query passes everything. Updates `filtered_posts`
    /// and clamps `selected_index` to the new bounds.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_posts = self.posts.len(),
            query_len = self.search_query.len(),
        )
        .entered();

        self.filtered_posts = self
            .posts
            .iter()
            .filter(|post| post.title_matches(&self.search_query))
            .cloned()
            .collect();

        if self.filtered_posts.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_posts.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered_posts.len(), "search filter applied");
    }

    /// Computes a renderable UI view model from current state and terminal size.
    ///
    /// Handles windowing (showing the subset of rows around the selection),
    /// substring match highlighting, empty states, and the overlay/detail
    /// panels. Contains no rendering; the result is plain data.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        if let Route::Detail { id, state } = &self.route {
            return self.compute_detail_viewmodel(*id, state);
        }

        let mut vm = UIViewModel {
            display_items: vec![],
            selected_index: 0,
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: None,
            search_bar: self.compute_search_bar(),
            overlay: self.compute_overlay(),
            detail: None,
        };

        if self.filtered_posts.is_empty() {
            vm.empty_state = Some(self.compute_empty_state());
            return vm;
        }

        let available_rows = self.calculate_available_rows(rows);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_posts.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.filtered_posts.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        vm.display_items = self.filtered_posts[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, post)| {
                self.compute_display_item(post, visible_start + relative_idx, cols)
            })
            .collect();
        vm.selected_index = self.selected_index.saturating_sub(visible_start);

        vm
    }

    /// Computes the view model for the detail route.
    fn compute_detail_viewmodel(&self, id: u64, state: &DetailState) -> UIViewModel {
        let detail = match state {
            DetailState::Loading => DetailPage::Loading,
            DetailState::NotFound => DetailPage::NotFound,
            DetailState::Loaded { post, comments } => DetailPage::Loaded {
                title: post.title.clone(),
                body: post.body.clone(),
                comments: comments.iter().map(CommentView::from).collect(),
            },
        };

        UIViewModel {
            display_items: vec![],
            selected_index: 0,
            header: HeaderInfo {
                title: format!(" Post #{id} "),
            },
            footer: FooterInfo {
                keybindings: "Esc/b: back to list  q: quit".to_string(),
            },
            empty_state: None,
            search_bar: None,
            overlay: None,
            detail: Some(detail),
        }
    }

    /// Computes a display item for a single post row.
    ///
    /// Truncation to column widths happens in the renderer; this only flattens
    /// the body and computes highlight ranges for the title.
    fn compute_display_item(&self, post: &Post, absolute_idx: usize, _cols: usize) -> DisplayItem {
        let highlight_ranges = if self.search_query.is_empty() {
            vec![]
        } else {
            find_title_ranges(&post.title, &self.search_query)
        };

        DisplayItem {
            id: post.id,
            title: post.title.clone(),
            excerpt: post.body_excerpt(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Computes header information for the list route.
    fn compute_header(&self) -> HeaderInfo {
        let shown = self.filtered_posts.len();
        let total = self.posts.len();
        let title = if self.search_query.is_empty() {
            format!(" Posts ({total}) ")
        } else {
            format!(" Posts ({shown}/{total}) ")
        };
        HeaderInfo { title }
    }

    /// Computes footer keybinding hints for the current mode.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.overlay.is_some() {
            "Esc: close comments  j/k: scroll  q: quit".to_string()
        } else {
            match self.input_mode {
                InputMode::Search(SearchFocus::Typing) => {
                    "ESC: exit search  Enter: results  Type to filter".to_string()
                }
                InputMode::Search(SearchFocus::Navigating) => {
                    "ESC: exit search  /: edit query  j/k: navigate  Enter: comments  o: open".to_string()
                }
                InputMode::Normal => {
                    "j/k: navigate  /: search  Enter: comments  o: open post  q: quit".to_string()
                }
            }
        };
        FooterInfo { keybindings }
    }

    /// Computes search bar state if in search mode.
    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        if matches!(self.input_mode, InputMode::Search(_)) {
            Some(SearchBarInfo {
                query: self.search_query.clone(),
            })
        } else {
            None
        }
    }

    /// Computes the overlay view, if the comments overlay is open.
    fn compute_overlay(&self) -> Option<OverlayView> {
        self.overlay.as_ref().map(|overlay| OverlayView {
            title: overlay.post.title.clone(),
            body: overlay.post.body.clone(),
            comments: overlay.comments.iter().map(CommentView::from).collect(),
            scroll: overlay.scroll,
        })
    }

    /// Computes the empty state message for the list route.
    fn compute_empty_state(&self) -> EmptyState {
        if !self.initial_loaded {
            EmptyState {
                message: "Loading posts...".to_string(),
                subtitle: "Fetching the first page from the remote API".to_string(),
            }
        } else if self.search_query.is_empty() {
            EmptyState {
                message: "No posts available".to_string(),
                subtitle: "The remote API returned nothing".to_string(),
            }
        } else {
            EmptyState {
                message: "No posts match that title".to_string(),
                subtitle: "Backspace to widen the search, Esc to clear it".to_string(),
            }
        }
    }

    /// Calculates rows available for the post table after UI chrome.
    ///
    /// Accounts for header, borders, footer, and the search bar when active.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(6),
            InputMode::Search(_) => total_rows.saturating_sub(9),
        }
    }
}

/// Finds all case-insensitive occurrences of `query` in `title`.
///
/// Returns non-overlapping `(start, end)` ranges in character indices
/// (exclusive end), scanning left to right. Used for highlighting the matched
/// substring in the post table.
#[must_use]
pub fn find_title_ranges(title: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }

    let title_chars: Vec<char> = title.chars().flat_map(lower_char).collect();
    let query_chars: Vec<char> = query.chars().flat_map(lower_char).collect();

    if query_chars.len() > title_chars.len() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + query_chars.len() <= title_chars.len() {
        if title_chars[i..i + query_chars.len()] == query_chars[..] {
            ranges.push((i, i + query_chars.len()));
            i += query_chars.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Lowercases a single character, keeping only the first resulting char.
///
/// Multi-char lowercase expansions would shift indices against the original
/// title; truncating keeps ranges aligned for the ASCII-centric titles this
/// application displays.
fn lower_char(c: char) -> Option<char> {
    c.to_lowercase().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: format!("body {id}"),
        }
    }

    fn state_with(posts: Vec<Post>) -> AppState {
        let mut state = AppState::new(Theme::default(), 12);
        state.replace_all(posts);
        state
    }

    #[test]
    fn filter_scenario_alp_matches_alpha_only() {
        let mut state = state_with(vec![post(1, "Alpha"), post(2, "Beta")]);
        state.search_query = "alp".to_string();
        state.apply_search_filter();

        assert_eq!(state.filtered_posts.len(), 1);
        assert_eq!(state.filtered_posts[0].id, 1);
    }

    #[test]
    fn filtering_is_case_insensitive() {
        let mut state = state_with(vec![post(1, "My Title Example")]);

        for query in ["TITLE", "title", "Title"] {
            state.search_query = query.to_string();
            state.apply_search_filter();
            assert_eq!(state.filtered_posts.len(), 1, "query {query:?} should match");
        }
    }

    #[test]
    fn empty_query_restores_full_sequence() {
        // Idempotent narrowing: filtering by s then by "" yields the base
        // sequence again, not a further restriction.
        let mut state = state_with(vec![post(1, "Alpha"), post(2, "Beta"), post(3, "Gamma")]);

        state.search_query = "alp".to_string();
        state.apply_search_filter();
        assert_eq!(state.filtered_posts.len(), 1);

        state.search_query = String::new();
        state.apply_search_filter();
        assert_eq!(state.filtered_posts, state.posts);
    }

    #[test]
    fn filtered_view_preserves_order() {
        let mut state = state_with(vec![
            post(1, "match one"),
            post(2, "other"),
            post(3, "match two"),
            post(4, "match three"),
        ]);
        state.search_query = "match".to_string();
        state.apply_search_filter();

        let ids: Vec<u64> = state.filtered_posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn appending_empty_page_leaves_length_unchanged() {
        let mut state = state_with(vec![post(1, "a"), post(2, "b")]);
        state.append_page(vec![]);
        assert_eq!(state.posts.len(), 2);
    }

    #[test]
    fn append_does_not_deduplicate() {
        let mut state = state_with(vec![post(1, "a")]);
        state.append_page(vec![post(1, "a")]);
        assert_eq!(state.posts.len(), 2);
    }

    #[test]
    fn selection_clamps_when_filter_narrows() {
        let mut state = state_with(vec![post(1, "Alpha"), post(2, "Beta"), post(3, "Gamma")]);
        state.selected_index = 2;

        state.search_query = "alpha".to_string();
        state.apply_search_filter();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_does_not_wrap() {
        let mut state = state_with(vec![post(1, "a"), post(2, "b")]);
        state.move_selection_down();
        state.move_selection_down();
        state.move_selection_down();
        assert_eq!(state.selected_index, 1);

        state.move_selection_up();
        state.move_selection_up();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn sentinel_visible_only_on_last_row() {
        let mut state = state_with(vec![post(1, "a"), post(2, "b")]);
        assert!(!state.sentinel_visible());

        state.move_selection_down();
        assert!(state.sentinel_visible());
    }

    #[test]
    fn sentinel_hidden_before_initial_load() {
        let state = AppState::new(Theme::default(), 12);
        assert!(!state.sentinel_visible());
    }

    #[test]
    fn title_ranges_find_all_occurrences() {
        assert_eq!(find_title_ranges("abcabc", "ABC"), vec![(0, 3), (3, 6)]);
        assert_eq!(find_title_ranges("My Title", "title"), vec![(3, 8)]);
        assert_eq!(find_title_ranges("short", "longer than title"), vec![]);
        assert!(find_title_ranges("anything", "").is_empty());
    }

    #[test]
    fn viewmodel_windows_around_selection() {
        let posts: Vec<Post> = (1..=50).map(|i| post(i, &format!("post {i}"))).collect();
        let mut state = state_with(posts);
        state.selected_index = 40;

        let vm = state.compute_viewmodel(24, 80);
        let available = 24 - 6;
        assert_eq!(vm.display_items.len(), available);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].id, 41);
    }

    #[test]
    fn empty_search_result_has_empty_state() {
        let mut state = state_with(vec![post(1, "Alpha")]);
        state.search_query = "zzz".to_string();
        state.apply_search_filter();

        let vm = state.compute_viewmodel(24, 80);
        let empty = vm.empty_state.expect("empty state expected");
        assert_eq!(empty.message, "No posts match that title");
    }
}
