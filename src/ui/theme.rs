//! Theme management and ANSI escape sequence generation.
//!
//! Colour schemes are TOML documents with hex colours. Two are compiled in;
//! any other can be loaded from a file named by the `theme_file` option.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark (default)
//! - `catppuccin-latte`: Light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f9e2af"
//! accent = "#89dceb"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! tab_active_fg = "#1e1e2e"
//! tab_active_bg = "#f9e2af"
//! badge_fg = "#1e1e2e"
//! badge_bg = "#89dceb"
//! search_bar_border = "#585b70"
//! search_bar_focus = "#f9e2af"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! card_border = "#45475a"
//! card_selected_border = "#89dceb"
//! bar_fill = "#89dceb"
//! bar_empty = "#313244"
//! menu_highlight_fg = "#1e1e2e"
//! menu_highlight_bg = "#cba6f7"
//! error_fg = "#f38ba8"
//! empty_state_fg = "#89b4fa"
//! loading_fg = "#f9e2af"
//! ```

use crate::domain::{Result, StarscopeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (`"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title text.
    pub header_fg: String,
    /// Optional title background.
    #[serde(default)]
    pub header_bg: Option<String>,
    /// Tagline, card titles' accents and bar value text.
    pub accent: String,

    pub text_normal: String,
    /// Secondary text (labels, footer, inactive tabs).
    pub text_dim: String,
    /// Separator lines.
    pub border: String,

    pub tab_active_fg: String,
    pub tab_active_bg: String,
    /// Result-count badge on tabs.
    pub badge_fg: String,
    pub badge_bg: String,

    pub search_bar_border: String,
    /// Search box border while it has focus.
    pub search_bar_focus: String,
    /// Search match in card titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub card_border: String,
    pub card_selected_border: String,
    pub bar_fill: String,
    pub bar_empty: String,

    /// Highlighted sort popover entry.
    pub menu_highlight_fg: String,
    pub menu_highlight_bg: String,

    pub error_fg: String,
    pub empty_state_fg: String,
    pub loading_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name. `None` for unknown names.
    ///
    /// ```rust
    /// use starscope::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(source).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`StarscopeError::Theme`] if the file cannot be read or is not
    /// a complete theme document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            StarscopeError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            StarscopeError::Theme(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Hex colour to RGB; malformed colours fall back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).unwrap_or(255)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex colour.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in theme fails to parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::default().name, "catppuccin-mocha");
        assert!(Theme::from_name("catppuccin-latte").is_some());
    }

    #[test]
    fn escapes_use_true_color() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_round_trips() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn incomplete_theme_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, StarscopeError::Theme(_)));
    }
}
