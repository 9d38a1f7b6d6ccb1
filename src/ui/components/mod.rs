//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title, tagline and category tabs
//! - [`search`]: Search box, sort control and sort popover
//! - [`grid`]: Card grid
//! - [`status`]: Loading indicator and error panel
//! - [`empty`]: Empty-state message
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Title]
//! [Tagline]
//! [Tabs]
//! [Border]
//! [Search box - 3 lines]   (not on the films tab)
//! [Sort control]           (not on the films tab)
//! [Body: loading | error | empty | cards]
//! [Border]
//! [Footer]
//! ```
//!
//! The sort popover is drawn last so it overlays the body.

mod empty;
mod footer;
mod grid;
mod header;
mod search;
mod status;

use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

/// Renders a horizontal border line. Returns the next free row.
fn render_border(canvas: &mut Canvas, row: usize, color: &str, cols: usize) -> usize {
    canvas.position_cursor(row, 1);
    canvas.print(&Theme::fg(color));
    canvas.print(&"─".repeat(cols));
    canvas.print(Theme::reset());
    row + 1
}

/// Renders a full frame for the view model.
pub fn render_layout(canvas: &mut Canvas, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut row = 2;
    row = header::render_header(canvas, row, &vm.header, theme, cols);
    row = header::render_tabs(canvas, row, &vm.tabs, theme, cols);
    row = render_border(canvas, row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        row = search::render_search_bar(canvas, row, search, theme, cols);
    }
    let sort_row = row;
    if let Some(sort) = &vm.sort_control {
        row = search::render_sort_control(canvas, row, sort, theme, cols);
    }

    let footer_row = rows.saturating_sub(1).max(row + 1);
    let border_row = footer_row - 1;
    let body_top = row;
    let body_height = border_row.saturating_sub(body_top);

    match &vm.body {
        BodyView::Loading { message } => {
            status::render_loading(canvas, body_top, body_height, message, theme, cols);
        }
        BodyView::Error(panel) => {
            status::render_error(canvas, body_top, body_height, panel, theme, cols);
        }
        BodyView::Empty(empty) => {
            empty::render_empty_state(canvas, body_top, body_height, empty, theme, cols);
        }
        BodyView::Cards(cards) => {
            grid::render_card_grid(canvas, body_top, body_height, cards, theme, cols);
        }
    }

    if let Some(sort) = &vm.sort_control {
        search::render_sort_menu(canvas, sort_row + 1, sort, theme, cols);
    }

    render_border(canvas, border_row, &theme.colors.border, cols);
    footer::render_footer(canvas, footer_row, &vm.footer, theme, cols);
}
