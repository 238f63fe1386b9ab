//! UI helper functions for creating styled blocks.
//!
//! Reusable builders so every section of the widget gets the same borders
//! and title treatment.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    symbols::border,
    widgets::{Block, Borders},
};

use super::style::StyleSheet;
use crate::theme::{BORDER_STYLE, TITLE_STYLE};

/// Character used for the loading skeleton.
const SKELETON_CHAR: &str = "░";

// ============================================================================
// Border Block Helpers
// ============================================================================

/// Creates a bordered section block styled by focus state.
///
/// Focused sections get the primary border colour, a double border and a
/// `●` marker before the title.
#[must_use]
pub fn create_section_block<'a>(title: &str, focused: bool, styles: &StyleSheet) -> Block<'a> {
    let (border_style, border_set, title_style, display_title) = if focused {
        (
            styles.border_focused,
            border::DOUBLE,
            styles.border_focused.add_modifier(Modifier::BOLD),
            if title.is_empty() {
                String::new()
            } else {
                format!(" ● {title} ")
            },
        )
    } else {
        (
            BORDER_STYLE,
            border::ROUNDED,
            Style::new()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            if title.is_empty() {
                String::new()
            } else {
                format!(" {title} ")
            },
        )
    };

    Block::default()
        .borders(Borders::ALL)
        .title(display_title)
        .title_style(title_style)
        .border_set(border_set)
        .border_style(border_style)
}

/// Creates a popup-style block with centered title and rounded borders.
#[must_use]
pub fn create_popup_block<'a>(title: &str) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .title_style(TITLE_STYLE)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(BORDER_STYLE)
}

/// Placeholder bar shown while a value loads.
#[must_use]
pub fn skeleton(width: usize) -> String {
    SKELETON_CHAR.repeat(width)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, widgets::Paragraph};

    fn rendered_top_row(block: Block<'_>) -> String {
        let backend = TestBackend::new(24, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| frame.render_widget(Paragraph::new("x").block(block), frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol())
            .collect()
    }

    #[test]
    fn test_section_block_titles() {
        let styles = StyleSheet::default();
        insta::assert_snapshot!(
            rendered_top_row(create_section_block("Amount", true, &styles)),
            @"╔ ● Amount ════════════╗"
        );
        insta::assert_snapshot!(
            rendered_top_row(create_section_block("Amount", false, &styles)),
            @"╭ Amount ──────────────╮"
        );
    }

    #[test]
    fn test_popup_block_centers_title() {
        insta::assert_snapshot!(
            rendered_top_row(create_popup_block("Pay")),
            @"╭──────── Pay ─────────╮"
        );
    }

    #[test]
    fn test_skeleton() {
        assert_eq!(skeleton(3), "░░░");
        assert_eq!(skeleton(0), "");
    }
}
