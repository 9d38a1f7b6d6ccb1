//! Percentage scaling for card bars.
//!
//! Values arrive as display strings (`"172"`, `"1,358"`, `"unknown"`).
//! Anything that does not parse as a number scales to 0 so the bar is simply
//! empty.

/// Exponent treated as a full population bar (10^12).
const LOG_SCALE_DECADES: f64 = 12.0;

/// Parses a display number, ignoring thousands separators.
#[must_use]
pub fn parse_measure(value: &str) -> Option<f64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `value / max` as a percentage clamped to `0..=100`.
///
/// ```
/// use starscope::ui::scale::linear_percent;
///
/// assert_eq!(linear_percent("125", 250.0), 50.0);
/// assert_eq!(linear_percent("1,358", 150.0), 100.0);
/// assert_eq!(linear_percent("unknown", 150.0), 0.0);
/// ```
#[must_use]
pub fn linear_percent(value: &str, max: f64) -> f64 {
    match parse_measure(value) {
        Some(n) if max > 0.0 => (n / max * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// `log10(value) / 12` as a percentage clamped to `0..=100`.
///
/// Values at or below 1 (including 0) give an empty bar.
#[must_use]
pub fn log_percent(value: &str) -> f64 {
    match parse_measure(value) {
        Some(n) if n > 0.0 => (n.log10() / LOG_SCALE_DECADES * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Number of filled cells for a bar `width` cells wide.
#[must_use]
pub fn filled_cells(percent: f64, width: usize) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let cells = (percent.clamp(0.0, 100.0) / 100.0 * width as f64).round() as usize;
    cells.min(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scale_clamps_both_ends() {
        assert_eq!(linear_percent("300", 250.0), 100.0);
        assert_eq!(linear_percent("-5", 250.0), 0.0);
        assert_eq!(linear_percent("", 250.0), 0.0);
    }

    #[test]
    fn population_uses_twelve_decades() {
        assert!((log_percent("1000000") - 50.0).abs() < 1e-9);
        assert_eq!(log_percent("1000000000000000"), 100.0);
        assert_eq!(log_percent("0"), 0.0);
        assert_eq!(log_percent("unknown"), 0.0);
    }

    #[test]
    fn separators_are_ignored() {
        assert_eq!(parse_measure("1,000,000"), Some(1_000_000.0));
        assert_eq!(parse_measure("n/a"), None);
    }

    #[test]
    fn bar_cells_round_and_fit() {
        assert_eq!(filled_cells(50.0, 10), 5);
        assert_eq!(filled_cells(100.0, 7), 7);
        assert_eq!(filled_cells(0.0, 7), 0);
    }
}
