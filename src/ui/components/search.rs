//! Search field and sort control.

use crate::ui::helpers::{truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, SortControlInfo};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Width of the sort popover, borders included.
const SORT_MENU_WIDTH: usize = 24;

/// Renders the 3-row search box.
///
/// The border takes the focus colour while the box receives keystrokes; an
/// empty, unfocused box shows the placeholder instead of the text.
pub fn render_search_bar(canvas: &mut Canvas, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2).max(2);
    let inner_width = box_width - 2;
    let border = if search.is_focused {
        &theme.colors.search_bar_focus
    } else {
        &theme.colors.search_bar_border
    };

    canvas.position_cursor(row, 1);
    canvas.pad(SEARCH_BOX_MARGIN);
    canvas.print(&Theme::fg(border));
    canvas.print(&format!("┌{}┐", "─".repeat(inner_width)));
    canvas.print(Theme::reset());

    let (content, color) = if search.query.is_empty() && !search.is_focused {
        (format!(" {}", search.placeholder), &theme.colors.text_dim)
    } else if search.is_focused {
        (format!(" {}▏", search.query), &theme.colors.text_normal)
    } else {
        (format!(" {}", search.query), &theme.colors.text_normal)
    };
    let content = truncate(&content, inner_width);

    canvas.position_cursor(row + 1, 1);
    canvas.pad(SEARCH_BOX_MARGIN);
    canvas.print(&Theme::fg(border));
    canvas.print("│");
    canvas.print(&Theme::fg(color));
    canvas.print(&content);
    canvas.pad(inner_width.saturating_sub(content.chars().count()));
    canvas.print(&Theme::fg(border));
    canvas.print("│");
    canvas.print(Theme::reset());

    canvas.position_cursor(row + 2, 1);
    canvas.pad(SEARCH_BOX_MARGIN);
    canvas.print(&Theme::fg(border));
    canvas.print(&format!("└{}┘", "─".repeat(inner_width)));
    canvas.print(Theme::reset());

    row + 3
}

/// Renders the one-row sort control, right-aligned under the search box.
pub fn render_sort_control(canvas: &mut Canvas, row: usize, sort: &SortControlInfo, theme: &Theme, cols: usize) -> usize {
    let arrow = if sort.menu.is_some() { "▴" } else { "▾" };
    let text = truncate(&format!("Sort: {} {arrow} ", sort.current_label), cols);
    let len = text.chars().count();

    canvas.position_cursor(row, 1);
    canvas.pad(cols.saturating_sub(len + SEARCH_BOX_MARGIN));
    canvas.print(&Theme::fg(&theme.colors.accent));
    canvas.print(&text);
    canvas.print(Theme::reset());
    canvas.pad(SEARCH_BOX_MARGIN.min(cols.saturating_sub(len)));

    row + 1
}

/// Draws the open sort popover over the body, anchored below the control.
pub fn render_sort_menu(canvas: &mut Canvas, row: usize, sort: &SortControlInfo, theme: &Theme, cols: usize) {
    let Some(items) = &sort.menu else {
        return;
    };

    let width = SORT_MENU_WIDTH.min(cols);
    let inner = width.saturating_sub(2);
    let col = cols.saturating_sub(width + SEARCH_BOX_MARGIN) + 1;
    let border = Theme::fg(&theme.colors.accent);

    canvas.position_cursor(row, col);
    canvas.print(&border);
    canvas.print(&format!("┌{}┐", "─".repeat(inner)));

    for (offset, item) in items.iter().enumerate() {
        let marker = if item.is_current { "✓" } else { " " };
        let label = truncate(&format!("{marker} {}", item.label), inner);

        canvas.position_cursor(row + 1 + offset, col);
        canvas.print(&border);
        canvas.print("│");
        if item.is_highlighted {
            canvas.print(&Theme::fg(&theme.colors.menu_highlight_fg));
            canvas.print(&Theme::bg(&theme.colors.menu_highlight_bg));
        } else {
            canvas.print(&Theme::fg(&theme.colors.text_normal));
        }
        canvas.print(&label);
        canvas.pad(inner.saturating_sub(label.chars().count()));
        canvas.print(Theme::reset());
        canvas.print(&border);
        canvas.print("│");
    }

    canvas.position_cursor(row + 1 + items.len(), col);
    canvas.print(&border);
    canvas.print(&format!("└{}┘", "─".repeat(inner)));
    canvas.print(Theme::reset());
}
