//! Card grid renderer.
//!
//! Cards are drawn row-major into fixed-size cells. Each card is a bordered
//! box one column narrower than its cell, leaving a gutter between columns.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ LUKE SKYWALKER         ID: 1 │
//! │ HEIGHT                172 cm │
//! │ ███████████░░░░░░░░░░░░░░░░░ │
//! │ Birth Year: 19BBY            │
//! │ EP 1 · EP 2 · EP 3           │
//! └──────────────────────────────┘
//! ```

use crate::ui::helpers::{render_highlighted_text, truncate, wrap, Canvas};
use crate::ui::scale::filled_cells;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Card, CardGrid, CARD_TEXT_LINES};

/// Renders the visible window of the grid starting at `top`, followed by a
/// position indicator when cards are scrolled out of view.
pub fn render_card_grid(canvas: &mut Canvas, top: usize, height: usize, grid: &CardGrid, theme: &Theme, cols: usize) {
    let columns = grid.columns.max(1);

    for (idx, card) in grid.cards.iter().enumerate() {
        let row = top + (idx / columns) * grid.card_height;
        let col = (idx % columns) * grid.card_width + 1;
        let box_width = if columns > 1 {
            grid.card_width.saturating_sub(1)
        } else {
            grid.card_width
        };
        render_card(canvas, row, col, box_width, grid.card_height, card, theme);
    }

    let shown_end = grid.first_index + grid.cards.len();
    if grid.first_index > 0 || shown_end < grid.total {
        let used_rows = grid.cards.len().div_ceil(columns) * grid.card_height;
        if used_rows < height {
            canvas.position_cursor(top + used_rows, 1);
            canvas.print(&Theme::fg(&theme.colors.text_dim));
            canvas.centered(
                &format!("{}-{} of {}", grid.first_index + 1, shown_end, grid.total),
                cols,
            );
            canvas.print(Theme::reset());
        }
    }
}

/// Draws one card box at `(row, col)`, `width` × `height` cells.
fn render_card(canvas: &mut Canvas, row: usize, col: usize, width: usize, height: usize, card: &Card, theme: &Theme) {
    if width < 4 || height < 2 {
        return;
    }

    let inner = width - 4;
    let border_color = if card.is_selected {
        &theme.colors.card_selected_border
    } else {
        &theme.colors.card_border
    };
    let border = Theme::fg(border_color);
    let mut line = row;

    canvas.position_cursor(line, col);
    canvas.print(&border);
    canvas.print(&format!("┌{}┐", "─".repeat(width - 2)));
    canvas.print(Theme::reset());
    line += 1;

    let mut body = CardBody {
        canvas,
        col,
        inner,
        border: &border,
    };

    body.title(line, card, theme);
    line += 1;

    if let Some(subtitle) = &card.subtitle {
        body.plain(line, subtitle, &Theme::fg(&theme.colors.text_dim));
        line += 1;
    }

    for bar in &card.bars {
        body.split(line, &bar.label, &bar.value, theme);
        body.bar(line + 1, bar.percent, theme);
        line += 2;
    }

    for field in &card.fields {
        body.field(line, &field.label, &field.value, theme);
        line += 1;
    }

    if let Some(text) = &card.text {
        let mut wrapped = wrap(text, inner, CARD_TEXT_LINES);
        wrapped.resize(CARD_TEXT_LINES, String::new());
        for text_line in &wrapped {
            body.plain(line, text_line, &Theme::fg(&theme.colors.text_normal));
            line += 1;
        }
    }

    if !card.tags.is_empty() {
        body.plain(line, &card.tags.join(" · "), &Theme::fg(&theme.colors.accent));
        line += 1;
    }

    let bottom = row + height - 1;
    while line < bottom {
        body.plain(line, "", "");
        line += 1;
    }

    canvas.position_cursor(bottom, col);
    canvas.print(&border);
    canvas.print(&format!("└{}┘", "─".repeat(width - 2)));
    canvas.print(Theme::reset());
}

/// Writes bordered content rows of one card.
struct CardBody<'a> {
    canvas: &'a mut Canvas,
    col: usize,
    inner: usize,
    border: &'a str,
}

impl CardBody<'_> {
    fn open(&mut self, row: usize) {
        self.canvas.position_cursor(row, self.col);
        self.canvas.print(self.border);
        self.canvas.print("│ ");
        self.canvas.print(Theme::reset());
    }

    fn close(&mut self, used: usize) {
        self.canvas.print(Theme::reset());
        self.canvas.pad(self.inner.saturating_sub(used));
        self.canvas.print(self.border);
        self.canvas.print(" │");
        self.canvas.print(Theme::reset());
    }

    fn plain(&mut self, row: usize, text: &str, style: &str) {
        let text = truncate(text, self.inner);
        self.open(row);
        self.canvas.print(style);
        self.canvas.print(&text);
        self.close(text.chars().count());
    }

    fn title(&mut self, row: usize, card: &Card, theme: &Theme) {
        let badge = card
            .badge
            .as_ref()
            .map(|badge| truncate(badge, self.inner / 2))
            .unwrap_or_default();
        let badge_len = badge.chars().count();
        let room = self.inner.saturating_sub(badge_len + usize::from(badge_len > 0));
        let (title, ranges) = display_title(&card.title, &card.highlight_ranges, room);
        let title_len = title.chars().count();

        self.open(row);
        let base = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
        self.canvas.print(&base);
        render_highlighted_text(self.canvas, &title, &ranges, theme, &base);
        self.canvas.print(Theme::reset());
        self.canvas.pad(self.inner.saturating_sub(title_len + badge_len));
        self.canvas.print(&Theme::fg(&theme.colors.accent));
        self.canvas.print(&badge);
        self.close(self.inner);
    }

    fn split(&mut self, row: usize, label: &str, value: &str, theme: &Theme) {
        let value = truncate(value, self.inner / 2);
        let room = self.inner.saturating_sub(value.chars().count() + 1);
        let label = truncate(label, room);

        self.open(row);
        self.canvas.print(&Theme::fg(&theme.colors.text_dim));
        self.canvas.print(&label);
        self.canvas
            .pad(self.inner.saturating_sub(label.chars().count() + value.chars().count()));
        self.canvas.print(&Theme::fg(&theme.colors.accent));
        self.canvas.print(&value);
        self.close(self.inner);
    }

    fn bar(&mut self, row: usize, percent: f64, theme: &Theme) {
        let filled = filled_cells(percent, self.inner);

        self.open(row);
        self.canvas.print(&Theme::fg(&theme.colors.bar_fill));
        self.canvas.print(&"█".repeat(filled));
        self.canvas.print(&Theme::fg(&theme.colors.bar_empty));
        self.canvas.print(&"░".repeat(self.inner - filled));
        self.close(self.inner);
    }

    fn field(&mut self, row: usize, label: &str, value: &str, theme: &Theme) {
        let label = format!("{label}: ");
        let label_len = label.chars().count().min(self.inner);
        let value = truncate(value, self.inner - label_len);

        self.open(row);
        self.canvas.print(&Theme::fg(&theme.colors.text_dim));
        self.canvas.print(&truncate(&label, self.inner));
        self.canvas.print(&Theme::fg(&theme.colors.text_normal));
        self.canvas.print(&value);
        self.close(label_len + value.chars().count());
    }
}

/// Uppercases a card title to fit `room` columns and carries the match ranges
/// over to it. Characters that grow when uppercased (`ß` to `SS`) shift later
/// ranges; ranges at or past a truncation cut never cover the `…`.
fn display_title(title: &str, ranges: &[(usize, usize)], room: usize) -> (String, Vec<(usize, usize)>) {
    let mut upper = String::with_capacity(title.len());
    let mut starts = Vec::with_capacity(title.len() + 1);
    let mut len = 0;
    for c in title.chars() {
        starts.push(len);
        for u in c.to_uppercase() {
            upper.push(u);
            len += 1;
        }
    }
    starts.push(len);

    let shown = truncate(&upper, room);
    let shown_len = shown.chars().count();
    let visible = if shown_len < len { shown_len.saturating_sub(1) } else { len };

    let ranges = ranges
        .iter()
        .filter_map(|&(start, end)| {
            let start = *starts.get(start)?;
            let end = starts.get(end).copied().unwrap_or(len).min(visible);
            (start < end).then_some((start, end))
        })
        .collect();
    (shown, ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_follow_characters_that_grow() {
        let (title, ranges) = display_title("Straße Runner", &[(7, 13)], 40);
        assert_eq!(title, "STRASSE RUNNER");
        assert_eq!(ranges, vec![(8, 14)]);
    }

    #[test]
    fn ranges_stop_before_the_ellipsis() {
        let (title, ranges) = display_title("Luke Skywalker", &[(0, 4), (5, 14)], 8);
        assert_eq!(title, "LUKE SK…");
        assert_eq!(ranges, vec![(0, 4), (5, 7)]);
    }

    #[test]
    fn ranges_past_the_cut_are_dropped() {
        let (_, ranges) = display_title("Luke Skywalker", &[(10, 14)], 8);
        assert!(ranges.is_empty());
    }

    #[test]
    fn highlight_never_covers_the_ellipsis() {
        let theme = Theme::default();
        let card = Card {
            title: "Luke Skywalker".to_string(),
            highlight_ranges: vec![(5, 14)],
            ..Card::default()
        };
        let mut canvas = Canvas::new();
        let mut body = CardBody {
            canvas: &mut canvas,
            col: 1,
            inner: 12,
            border: "",
        };
        body.title(1, &card, &theme);

        let highlight = Theme::bg(&theme.colors.match_highlight_bg);
        let frame = canvas.into_string();
        let lit = frame.split(highlight.as_str()).nth(1).unwrap();
        assert_eq!(lit.split(Theme::reset()).next(), Some("SKYWAL"));
        assert!(frame.contains('…'));
    }
}
