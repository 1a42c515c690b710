//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components. It handles mode switching
//! (normal, search, detail, empty state) and layers the comments overlay on
//! top of the list.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the browser UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// appropriate rendering mode (normal, search, detail, or empty state). The
/// comments overlay, when open, is drawn last so it sits above the list.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// Prints ANSI-styled output to stdout using `print!` macros. Does not clear
/// the screen or flush; the event loop owns those.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a view model with mode-specific layout.
///
/// Chooses rendering strategy based on view model state:
/// - Detail route: Header, detail page, footer
/// - Empty state: Centered message display
/// - Search mode: Header, search bar, table, footer
/// - Normal mode: Header, table, footer
///
/// The comments overlay is layered on top of whichever list layout rendered.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if vm.detail.is_some() {
        components::render_detail_mode(vm, theme, cols, rows);
        return;
    }

    if let Some(empty) = &vm.empty_state {
        components::render_empty_state(empty, theme, cols);
    } else if let Some(search) = &vm.search_bar {
        components::render_search_mode(vm, search, theme, cols, rows);
    } else {
        components::render_normal_mode(vm, theme, cols, rows);
    }

    if let Some(overlay) = &vm.overlay {
        components::render_overlay(overlay, theme, cols, rows);
    }
}
