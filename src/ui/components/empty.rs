//! Empty state component renderer.

use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty-state message, with its subtitle below when present,
/// centred in the body area.
pub fn render_empty_state(canvas: &mut Canvas, top: usize, height: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let row = top + height.saturating_sub(2) / 2;

    canvas.position_cursor(row, 1);
    canvas.print(&Theme::fg(&theme.colors.empty_state_fg));
    canvas.centered(&empty.message, cols);
    canvas.print(Theme::reset());

    if empty.subtitle.is_empty() {
        return;
    }

    canvas.position_cursor(row + 1, 1);
    canvas.print(Theme::dim());
    canvas.print(&Theme::fg(&theme.colors.text_dim));
    canvas.centered(&empty.subtitle, cols);
    canvas.print(Theme::reset());
}
