//! Loading indicator and error panel.

use crate::ui::helpers::{wrap, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ErrorPanel;

/// Lines of error text shown before truncating.
const MAX_ERROR_LINES: usize = 3;

/// Renders the loading message centred in the body area.
pub fn render_loading(canvas: &mut Canvas, top: usize, height: usize, message: &str, theme: &Theme, cols: usize) {
    canvas.position_cursor(top + height / 2, 1);
    canvas.print(&Theme::fg(&theme.colors.loading_fg));
    canvas.centered(&format!("◌ {message}"), cols);
    canvas.print(Theme::reset());
}

/// Renders the error message with the retry control below it.
///
/// ```text
///            ⚠ Error
///          Network Error
///
///          [ Try Again ]
///         press r to retry
/// ```
pub fn render_error(canvas: &mut Canvas, top: usize, height: usize, panel: &ErrorPanel, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(4).max(1);
    let lines = wrap(&panel.message, width, MAX_ERROR_LINES);
    let block_height = lines.len() + 4;
    let mut row = top + height.saturating_sub(block_height) / 2;

    canvas.position_cursor(row, 1);
    canvas.print(Theme::bold());
    canvas.print(&Theme::fg(&theme.colors.error_fg));
    canvas.centered("⚠ Error", cols);
    canvas.print(Theme::reset());
    row += 1;

    for line in &lines {
        canvas.position_cursor(row, 1);
        canvas.print(&Theme::fg(&theme.colors.error_fg));
        canvas.centered(line, cols);
        canvas.print(Theme::reset());
        row += 1;
    }

    let button = format!("[ {} ]", panel.retry_label);
    let left = cols.saturating_sub(button.chars().count()) / 2;
    canvas.position_cursor(row + 1, 1);
    canvas.pad(left);
    canvas.print(Theme::bold());
    canvas.print(&Theme::fg(&theme.colors.tab_active_fg));
    canvas.print(&Theme::bg(&theme.colors.error_fg));
    canvas.print(&button);
    canvas.print(Theme::reset());

    canvas.position_cursor(row + 2, 1);
    canvas.print(&Theme::fg(&theme.colors.text_dim));
    canvas.centered("press r to retry", cols);
    canvas.print(Theme::reset());
}
