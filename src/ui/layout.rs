//! Layout calculations for the recharge widget.
//!
//! This module provides layout structs and helper functions for
//! calculating UI element positions and sizes.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

// ============================================================================
// Constants
// ============================================================================

/// Height of a bordered section holding one line of content
pub const SECTION_HEIGHT: u16 = 3;

/// Height of single-line rows (subtitle, inline error, status, help)
pub const LINE_HEIGHT: u16 = 1;

// ============================================================================
// Layout Structs
// ============================================================================

/// Areas inside the widget modal, top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct WidgetLayout {
    pub subtitle: Rect,
    pub balance: Rect,
    pub presets: Rect,
    pub input: Rect,
    pub input_error: Rect,
    pub button: Rect,
    pub status: Rect,
    pub help: Rect,
}

// ============================================================================
// Layout Functions
// ============================================================================

/// Split the modal's inner area into the widget sections
#[must_use]
pub fn calculate_widget_layout(area: Rect) -> WidgetLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LINE_HEIGHT),    // Subtitle
            Constraint::Length(LINE_HEIGHT),    // Spacer
            Constraint::Length(SECTION_HEIGHT), // Balance
            Constraint::Length(SECTION_HEIGHT), // Presets
            Constraint::Length(SECTION_HEIGHT), // Custom amount
            Constraint::Length(LINE_HEIGHT),    // Inline error
            Constraint::Length(SECTION_HEIGHT), // Pay button
            Constraint::Length(LINE_HEIGHT),    // Status banner
            Constraint::Min(0),
            Constraint::Length(LINE_HEIGHT), // Help text
        ])
        .split(area);

    WidgetLayout {
        subtitle: chunks[0],
        balance: chunks[2],
        presets: chunks[3],
        input: chunks[4],
        input_error: chunks[5],
        button: chunks[6],
        status: chunks[7],
        help: chunks[9],
    }
}

/// Calculate a centered popup area within a parent area
///
/// # Arguments
/// * `parent` - The parent area to center within
/// * `width` - Desired popup width in columns
/// * `height` - Desired popup height in rows
#[must_use]
pub fn centered_popup_area(parent: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(parent.width.saturating_sub(4));
    let popup_height = height.min(parent.height.saturating_sub(4));

    let popup_x = parent.x + (parent.width.saturating_sub(popup_width)) / 2;
    let popup_y = parent.y + (parent.height.saturating_sub(popup_height)) / 2;

    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

// ============================================================================
// Tests
// ============================================================================
