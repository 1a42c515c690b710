//! Comments overlay and detail page renderers.
//!
//! This module renders the two comment-bearing surfaces: the modal overlay
//! floating above the post list, and the full-screen detail page for a single
//! post. Both share the same comment block layout (author, email, wrapped
//! body).

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CommentView, DetailPage, OverlayView, NO_COMMENTS_MESSAGE, POST_NOT_FOUND_MESSAGE};

/// Horizontal margin of the overlay box (columns on each side).
const OVERLAY_MARGIN_COLS: usize = 4;

/// Vertical margin of the overlay box (rows above and below).
const OVERLAY_MARGIN_ROWS: usize = 2;

/// Renders the comments overlay box above whatever is underneath.
///
/// The box is centered with fixed margins and drawn opaque: every interior
/// cell is painted so the table rows below never bleed through. Contents, top
/// to bottom: post title, a separator, the post body, a separator, then the
/// comment list starting at the scroll offset. When the post has no comments
/// the list area shows [`NO_COMMENTS_MESSAGE`] instead.
///
/// # Parameters
///
/// * `overlay` - Overlay content (post, comments, scroll offset)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
/// * `rows` - Terminal height in rows
pub fn render_overlay(overlay: &OverlayView, theme: &Theme, cols: usize, rows: usize) {
    let box_left = OVERLAY_MARGIN_COLS + 1;
    let box_width = cols.saturating_sub(OVERLAY_MARGIN_COLS * 2);
    let inner_width = box_width.saturating_sub(4);
    let box_top = OVERLAY_MARGIN_ROWS + 1;
    let box_bottom = rows.saturating_sub(OVERLAY_MARGIN_ROWS);
    if box_bottom <= box_top + 2 || inner_width == 0 {
        return;
    }

    render_box_top(box_top, box_left, &overlay.title, theme, box_width);

    let mut current_row = box_top + 1;
    let content_end = box_bottom.saturating_sub(1);

    for line in wrap_text(&overlay.body, inner_width) {
        if current_row >= content_end {
            break;
        }
        render_box_line(current_row, box_left, theme, box_width, |theme| {
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print!("{line}");
            line.chars().count()
        });
        current_row += 1;
    }

    if current_row < content_end {
        render_box_separator(current_row, box_left, theme, box_width);
        current_row += 1;
    }

    if overlay.comments.is_empty() {
        if current_row < content_end {
            render_box_line(current_row, box_left, theme, box_width, |theme| {
                print!("{}", Theme::dim());
                print!("{}", Theme::fg(&theme.colors.text_dim));
                print!("{NO_COMMENTS_MESSAGE}");
                NO_COMMENTS_MESSAGE.len()
            });
            current_row += 1;
        }
    } else {
        for comment in overlay.comments.iter().skip(overlay.scroll) {
            current_row =
                render_comment_in_box(current_row, content_end, box_left, comment, theme, box_width);
            if current_row >= content_end {
                break;
            }
        }
    }

    // Blank interior below the content keeps the box opaque.
    while current_row < content_end {
        render_box_line(current_row, box_left, theme, box_width, |_| 0);
        current_row += 1;
    }

    render_box_bottom(content_end, box_left, theme, box_width);
}

/// Renders the full-screen detail page body between header and footer chrome.
///
/// # Parameters
///
/// * `detail` - Detail page content (loading, not found, or loaded)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
/// * `rows` - Terminal height in rows
///
/// # Layout
///
/// The caller renders the surrounding header, borders, and footer; this
/// function owns the rows in between (rows 4 through `rows - 3`).
pub fn render_detail_page(detail: &DetailPage, theme: &Theme, cols: usize, rows: usize) {
    let content_top = 4;
    let content_end = rows.saturating_sub(2);
    let width = cols.saturating_sub(4);

    match detail {
        DetailPage::Loading => {
            render_centered_line(6, "Loading post...", &theme.colors.empty_state_fg, cols);
        }
        DetailPage::NotFound => {
            render_centered_line(6, POST_NOT_FOUND_MESSAGE, &theme.colors.empty_state_fg, cols);
        }
        DetailPage::Loaded {
            title,
            body,
            comments,
        } => {
            let mut current_row = content_top;

            position_cursor(current_row, 3);
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.header_fg));
            print!("{}", truncate_chars(title, width));
            print!("{}", Theme::reset());
            current_row += 2;

            for line in wrap_text(body, width) {
                if current_row >= content_end {
                    return;
                }
                position_cursor(current_row, 3);
                print!("{}", Theme::fg(&theme.colors.text_normal));
                print!("{line}");
                print!("{}", Theme::reset());
                current_row += 1;
            }
            current_row += 1;

            if current_row >= content_end {
                return;
            }
            position_cursor(current_row, 3);
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.header_fg));
            print!("Comments ({})", comments.len());
            print!("{}", Theme::reset());
            current_row += 2;

            if comments.is_empty() {
                if current_row < content_end {
                    position_cursor(current_row, 3);
                    print!("{}", Theme::dim());
                    print!("{}", Theme::fg(&theme.colors.text_dim));
                    print!("{NO_COMMENTS_MESSAGE}");
                    print!("{}", Theme::reset());
                }
                return;
            }

            for comment in comments {
                if current_row >= content_end {
                    return;
                }
                position_cursor(current_row, 3);
                print!("{}", Theme::fg(&theme.colors.comment_author_fg));
                print!("{}", truncate_chars(&comment.name, width));
                print!("{}", Theme::dim());
                print!("{}", Theme::fg(&theme.colors.text_dim));
                print!("  <{}>", comment.email);
                print!("{}", Theme::reset());
                current_row += 1;

                for line in wrap_text(&comment.body, width) {
                    if current_row >= content_end {
                        return;
                    }
                    position_cursor(current_row, 3);
                    print!("{}", Theme::fg(&theme.colors.text_normal));
                    print!("{line}");
                    print!("{}", Theme::reset());
                    current_row += 1;
                }
                current_row += 1;
            }
        }
    }
}

/// Renders one comment block (author line plus wrapped body) inside the
/// overlay box, stopping at `content_end`.
fn render_comment_in_box(
    row: usize,
    content_end: usize,
    box_left: usize,
    comment: &CommentView,
    theme: &Theme,
    box_width: usize,
) -> usize {
    let mut current_row = row;
    if current_row >= content_end {
        return current_row;
    }

    let inner_width = box_width.saturating_sub(4);
    let author = truncate_chars(&comment.name, inner_width);
    let author_len = author.chars().count();
    let email = format!("  <{}>", comment.email);
    let email_shown = author_len + email.chars().count() <= inner_width;

    render_box_line(current_row, box_left, theme, box_width, |theme| {
        print!("{}", Theme::fg(&theme.colors.comment_author_fg));
        print!("{author}");
        if email_shown {
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("{email}");
        }
        print!("{}", Theme::reset());
        author_len + if email_shown { email.chars().count() } else { 0 }
    });
    current_row += 1;

    for line in wrap_text(&comment.body, inner_width) {
        if current_row >= content_end {
            return current_row;
        }
        render_box_line(current_row, box_left, theme, box_width, |theme| {
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print!("{line}");
            line.chars().count()
        });
        current_row += 1;
    }

    if current_row < content_end {
        render_box_line(current_row, box_left, theme, box_width, |_| 0);
        current_row += 1;
    }
    current_row
}

/// Renders the top border of the overlay box with the post title embedded.
fn render_box_top(row: usize, col: usize, title: &str, theme: &Theme, box_width: usize) {
    let inner_width = box_width.saturating_sub(2);
    let title_text = format!(" {} ", truncate_chars(title, inner_width.saturating_sub(4)));
    let title_len = title_text.chars().count();

    position_cursor(row, col);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("┌─");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title_text}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}┐", "─".repeat(inner_width.saturating_sub(title_len + 1)));
    print!("{}", Theme::reset());
}

/// Renders a horizontal separator row inside the overlay box.
fn render_box_separator(row: usize, col: usize, theme: &Theme, box_width: usize) {
    let inner_width = box_width.saturating_sub(2);
    position_cursor(row, col);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("├{}┤", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}

/// Renders the bottom border of the overlay box.
fn render_box_bottom(row: usize, col: usize, theme: &Theme, box_width: usize) {
    let inner_width = box_width.saturating_sub(2);
    position_cursor(row, col);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}

/// Renders one interior row of the overlay box: left border, one space,
/// caller-supplied content, padding to the right border.
///
/// The closure prints the content and returns its visible character count so
/// padding can be computed without re-measuring styled text.
fn render_box_line<F>(row: usize, col: usize, theme: &Theme, box_width: usize, content: F)
where
    F: FnOnce(&Theme) -> usize,
{
    let inner_width = box_width.saturating_sub(4);

    position_cursor(row, col);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("│ ");
    print!("{}", Theme::reset());

    let printed = content(theme);

    print!("{}", Theme::reset());
    print!("{}", " ".repeat(inner_width.saturating_sub(printed)));
    print!("{}", Theme::fg(&theme.colors.border));
    print!(" │");
    print!("{}", Theme::reset());
}

/// Renders a single horizontally centered line of text.
fn render_centered_line(row: usize, text: &str, color: &str, cols: usize) {
    let text_len = text.chars().count();
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", Theme::reset());
}

/// Greedily wraps text into lines of at most `width` characters, breaking on
/// whitespace. Words longer than the width are hard-split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                let piece: String = chunk.iter().collect();
                if chunk.len() == width {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_len = word_len;
        } else {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(wrap_text("alpha beta gamma", 11), vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("short", 20), vec!["short"]);
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn wrap_collapses_internal_whitespace() {
        assert_eq!(wrap_text("a\n\nb\tc", 10), vec!["a b c"]);
    }
}
