//! Shared rendering utilities.
//!
//! Components draw into a [`Canvas`], a frame buffer of text and ANSI escape
//! sequences that the renderer prints in one go. Widths are counted in
//! characters, never bytes.

use crate::ui::theme::Theme;

/// Frame buffer for one render pass.
#[derive(Debug, Default, Clone)]
pub struct Canvas {
    buf: String,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed `(row, col)`.
    pub fn position_cursor(&mut self, row: usize, col: usize) {
        self.buf.push_str(&format!("\u{1b}[{row};{col}H"));
    }

    /// Appends text or an escape sequence.
    pub fn print(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Appends `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.buf.extend(std::iter::repeat(' ').take(count));
    }

    /// Appends `text` centred in `width` columns, truncated if it does not fit.
    pub fn centered(&mut self, text: &str, width: usize) {
        let text = truncate(text, width);
        let len = text.chars().count();
        let left = (width - len) / 2;
        self.pad(left);
        self.print(&text);
        self.pad(width - len - left);
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Greedy word wrap into at most `max_lines` lines of `width` characters.
/// The last line ends in `…` when text was dropped.
#[must_use]
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let extra = usize::from(!current.is_empty());
        if !current.is_empty() && current.chars().count() + extra + word.chars().count() > width {
            lines.push(truncate(&std::mem::take(&mut current), width));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(truncate(&current, width));
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = ellipsize(last, width);
        }
    }
    lines
}

fn ellipsize(line: &str, width: usize) -> String {
    if line.ends_with('…') {
        return line.to_string();
    }
    if line.chars().count() < width {
        return format!("{line}…");
    }
    let kept: String = line.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Prints `text` with the given character ranges in match colours, then
/// restores `base` (the escape sequence the surrounding text uses).
pub fn render_highlighted_text(
    canvas: &mut Canvas,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base: &str,
) {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }

        canvas.print(&chars[pos..start].iter().collect::<String>());
        canvas.print(&Theme::fg(&theme.colors.match_highlight_fg));
        canvas.print(&Theme::bg(&theme.colors.match_highlight_bg));
        canvas.print(&chars[start..end].iter().collect::<String>());
        canvas.print(Theme::reset());
        canvas.print(base);
        pos = end;
    }

    canvas.print(&chars[pos..].iter().collect::<String>());
}

/// Removes ANSI escape sequences and cursor moves, keeping printable text.
/// Each cursor move becomes a newline so rows stay apart.
#[must_use]
pub fn strip_ansi(frame: &str) -> String {
    let mut plain = String::with_capacity(frame.len());
    let mut chars = frame.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            plain.push(c);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
        }
        for terminator in chars.by_ref() {
            if terminator.is_ascii_alphabetic() {
                if terminator == 'H' {
                    plain.push('\n');
                }
                break;
            }
        }
    }
    plain
}
