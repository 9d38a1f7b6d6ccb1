//! Footer component renderer.

use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the centred keybinding hints. Returns the next free row.
pub fn render_footer(canvas: &mut Canvas, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    canvas.position_cursor(row, 1);
    canvas.print(&Theme::fg(&theme.colors.text_dim));
    canvas.centered(&footer.keybindings, cols);
    canvas.print(Theme::reset());
    row + 1
}
