//! Title block and category tabs.

use crate::ui::helpers::{truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, TabInfo};

/// Renders the centred title and tagline on two rows.
///
/// Returns the next free row.
pub fn render_header(canvas: &mut Canvas, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    canvas.position_cursor(row, 1);
    canvas.print(Theme::bold());
    canvas.print(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        canvas.print(&Theme::bg(bg));
    }
    canvas.centered(&header.title.to_uppercase(), cols);
    canvas.print(Theme::reset());

    canvas.position_cursor(row + 1, 1);
    canvas.print(Theme::dim());
    canvas.print(&Theme::fg(&theme.colors.accent));
    canvas.centered(&header.subtitle, cols);
    canvas.print(Theme::reset());

    row + 2
}

/// Renders the tab strip on one row.
///
/// Each tab reads `N Label` with `N` its jump key; the active tab is filled,
/// and a count badge follows the label when the category holds results.
pub fn render_tabs(canvas: &mut Canvas, row: usize, tabs: &[TabInfo], theme: &Theme, cols: usize) -> usize {
    canvas.position_cursor(row, 1);
    let mut used = 1;
    canvas.pad(1);

    for (idx, tab) in tabs.iter().enumerate() {
        let label = format!(" {} {} ", idx + 1, tab.label);
        let badge = tab.badge.as_ref().map(|count| format!(" {count} "));
        let width = label.chars().count() + badge.as_ref().map_or(0, |b| b.chars().count()) + 1;
        if used + width > cols {
            break;
        }

        if tab.is_active {
            canvas.print(Theme::bold());
            canvas.print(&Theme::fg(&theme.colors.tab_active_fg));
            canvas.print(&Theme::bg(&theme.colors.tab_active_bg));
        } else {
            canvas.print(&Theme::fg(&theme.colors.text_dim));
        }
        canvas.print(&label);
        canvas.print(Theme::reset());

        if let Some(badge) = &badge {
            canvas.print(&Theme::fg(&theme.colors.badge_fg));
            canvas.print(&Theme::bg(&theme.colors.badge_bg));
            canvas.print(badge);
            canvas.print(Theme::reset());
        }

        canvas.pad(1);
        used += width;
    }

    canvas.pad(cols.saturating_sub(used));
    row + 1
}

/// Renders a one-row status line: `text` truncated to the width.
pub fn render_line(canvas: &mut Canvas, row: usize, text: &str, color: &str, cols: usize) -> usize {
    canvas.position_cursor(row, 1);
    canvas.print(&Theme::fg(color));
    let text = truncate(text, cols);
    canvas.print(&text);
    canvas.pad(cols.saturating_sub(text.chars().count()));
    canvas.print(Theme::reset());
    row + 1
}
