//! Theme and styling for the wallet recharge widget.
//!
//! Fixed chrome colours live here as constants; the accent colours come from
//! the widget's theme config as `#rrggbb` strings and are resolved into a
//! [`Palette`].

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Color Constants
// ============================================================================

/// Default primary accent, `#8b5cf6`.
pub const PRIMARY_COLOR: Color = Color::Rgb(139, 92, 246);

/// Default success colour, `#059669`.
pub const SUCCESS_COLOR: Color = Color::Rgb(5, 150, 105);

/// Default error colour, `#dc2626`.
pub const ERROR_COLOR: Color = Color::Rgb(220, 38, 38);

/// Muted text color.
pub const MUTED_COLOR: Color = Color::Gray;

/// Amount by which each channel is reduced for the darkened primary.
const DARKEN_STEP: u8 = 30;

// ============================================================================
// Style Constants
// ============================================================================

/// Default border style for unfocused elements.
pub const BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for hint and secondary text.
pub const MUTED_STYLE: Style = Style::new().fg(MUTED_COLOR);

/// Style for the skeleton placeholder while the balance loads.
pub const SKELETON_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for titles.
pub const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// Palette
// ============================================================================

/// Accent colours resolved from the widget theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    /// Primary with every channel darkened; used for the focused pay button.
    pub primary_dark: Color,
    pub success: Color,
    pub error: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: PRIMARY_COLOR,
            primary_dark: darken(PRIMARY_COLOR),
            success: SUCCESS_COLOR,
            error: ERROR_COLOR,
        }
    }
}

impl Palette {
    /// Resolves a palette from hex strings, falling back to the default colour
    /// for any value that is not a valid `#rrggbb`.
    #[must_use]
    pub fn from_hex(primary: &str, success: &str, error: &str) -> Self {
        let primary = parse_hex(primary).unwrap_or(PRIMARY_COLOR);
        Self {
            primary,
            primary_dark: darken(primary),
            success: parse_hex(success).unwrap_or(SUCCESS_COLOR),
            error: parse_hex(error).unwrap_or(ERROR_COLOR),
        }
    }
}

/// Parses a `#rrggbb` (or `rrggbb`) string into an RGB colour.
#[must_use]
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Darkens an RGB colour by a fixed step per channel, clamped at zero.
///
/// Non-RGB colours are returned unchanged.
#[must_use]
pub fn darken(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            r.saturating_sub(DARKEN_STEP),
            g.saturating_sub(DARKEN_STEP),
            b.saturating_sub(DARKEN_STEP),
        ),
        other => other,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::with_hash("#8b5cf6", Some(Color::Rgb(139, 92, 246)))]
    #[case::without_hash("059669", Some(Color::Rgb(5, 150, 105)))]
    #[case::uppercase("#DC2626", Some(Color::Rgb(220, 38, 38)))]
    #[case::short_form("#fff", None)]
    #[case::not_hex("#zzzzzz", None)]
    #[case::empty("", None)]
    fn test_parse_hex(#[case] input: &str, #[case] expected: Option<Color>) {
        assert_eq!(parse_hex(input), expected);
    }

    #[test]
    fn test_darken_clamps_each_channel() {
        assert_eq!(
            darken(Color::Rgb(139, 92, 246)),
            Color::Rgb(109, 62, 216)
        );
        assert_eq!(darken(Color::Rgb(10, 30, 31)), Color::Rgb(0, 0, 1));
        assert_eq!(darken(Color::Red), Color::Red);
    }

    #[test]
    fn test_palette_falls_back_on_invalid_hex() {
        let palette = Palette::from_hex("purple", "#00ff00", "nope");
        assert_eq!(palette.primary, PRIMARY_COLOR);
        assert_eq!(palette.primary_dark, darken(PRIMARY_COLOR));
        assert_eq!(palette.success, Color::Rgb(0, 255, 0));
        assert_eq!(palette.error, ERROR_COLOR);
    }
}
