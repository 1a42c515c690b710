//! Table component renderer.
//!
//! This module renders the post list as a three-column table with ID, TITLE,
//! and EXCERPT columns. It supports selection highlighting and search match
//! highlighting on the title.

use crate::ui::helpers::{self, position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Fixed width of the ID column, including trailing gap.
const ID_WIDTH: usize = 6;

/// Fixed width of the TITLE column, including trailing gap.
const TITLE_WIDTH: usize = 44;

/// Renders the table column headers at the specified row.
///
/// Displays "ID", "TITLE", and "EXCERPT" column headers with bold styling and
/// theme colors.
///
/// # Parameters
///
/// * `row` - Row position to render the headers (1-indexed)
/// * `theme` - Active color theme
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{:<ID_WIDTH$}{:<TITLE_WIDTH$}{}", "ID", "TITLE", "EXCERPT");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// Iterates through display items and renders each as a table row with proper
/// selection and highlight styling.
///
/// # Parameters
///
/// * `row` - Starting row position for the table (1-indexed)
/// * `items` - List of display items to render
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns (for padding)
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single table row at the specified row position.
///
/// Displays one post with:
/// - ID column (fixed width, left-aligned)
/// - TITLE column (fixed width, left-aligned, truncated with an ellipsis)
/// - EXCERPT column (remaining width, left-aligned, truncated)
/// - Selection highlighting (full row background)
/// - Search match highlighting on the title (character ranges)
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Search match highlights (unless selected)
/// 3. Normal text color
///
/// The row is padded to fill the entire terminal width to ensure consistent
/// selection background rendering. Highlight ranges past the truncation point
/// are dropped so escape sequences never leak into the excerpt column.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let id_text = item.id.to_string();
    print!("{id_text}");
    print!("{}", " ".repeat(ID_WIDTH.saturating_sub(id_text.len())));

    let title_max = TITLE_WIDTH.saturating_sub(2);
    let title = truncate_chars(&item.title, title_max);
    let title_len = title.chars().count();

    if item.highlight_ranges.is_empty() {
        print!("{title}");
    } else {
        let visible_ranges: Vec<(usize, usize)> = item
            .highlight_ranges
            .iter()
            .filter(|(start, _)| *start < title_len)
            .map(|&(start, end)| (start, end.min(title_len)))
            .collect();
        helpers::render_highlighted_text(&title, &visible_ranges, theme, item.is_selected);
        if item.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        }
    }
    print!("{}", " ".repeat(TITLE_WIDTH.saturating_sub(title_len)));

    let excerpt_max = cols.saturating_sub(ID_WIDTH + TITLE_WIDTH);
    let excerpt = truncate_chars(&item.excerpt, excerpt_max);
    let excerpt_len = excerpt.chars().count();
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{excerpt}");
    print!("{}", " ".repeat(excerpt_max.saturating_sub(excerpt_len)));

    print!("{}", Theme::reset());
    row + 1
}
