//! Amount selection panels: preset row, custom input, inline error.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Focus, PresetView, WidgetSnapshot};
use crate::theme::MUTED_STYLE;
use crate::ui::helpers::create_section_block;
use crate::ui::style::StyleSheet;

const INPUT_CURSOR: &str = "▏";
const INPUT_PLACEHOLDER: &str = "Enter amount";

// ============================================================================
// Presets
// ============================================================================

/// Text for one preset button. Selected presets are bracketed so the
/// selection survives monochrome terminals.
#[must_use]
pub fn preset_label(preset: &PresetView) -> String {
    if preset.selected {
        format!("[{}]", preset.label)
    } else {
        format!(" {} ", preset.label)
    }
}

fn preset_style(preset: &PresetView, styles: &StyleSheet) -> Style {
    let base = if preset.selected {
        styles.preset_selected
    } else {
        styles.preset
    };
    if preset.highlighted {
        base.patch(styles.preset_cursor)
    } else {
        base
    }
}

pub fn render_presets(frame: &mut Frame, area: Rect, snapshot: &WidgetSnapshot) {
    let styles = &snapshot.styles;
    let focused = snapshot.focus == Focus::Presets;
    let block = create_section_block("", focused, styles);

    let mut spans = Vec::with_capacity(snapshot.presets.len() * 2);
    for (index, preset) in snapshot.presets.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(preset_label(preset), preset_style(preset, styles)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

// ============================================================================
// Custom Amount
// ============================================================================

pub fn render_input(frame: &mut Frame, area: Rect, snapshot: &WidgetSnapshot) {
    let styles = &snapshot.styles;
    let focused = snapshot.focus == Focus::CustomInput;
    let block = create_section_block(&snapshot.custom_amount_label, focused, styles);

    let text_style = if snapshot.input_error.is_some() {
        styles.input_error
    } else if focused {
        styles.input_focused
    } else {
        styles.input
    };

    let mut spans = vec![Span::styled(
        format!("{} ", snapshot.currency_symbol),
        MUTED_STYLE,
    )];
    if snapshot.input_text.is_empty() && !focused {
        spans.push(Span::styled(INPUT_PLACEHOLDER, MUTED_STYLE));
    } else {
        spans.push(Span::styled(snapshot.input_text.clone(), text_style));
    }
    if focused {
        spans.push(Span::styled(INPUT_CURSOR, styles.input_focused));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Inline validation or checkout-initialization error under the input.
pub fn render_error(frame: &mut Frame, area: Rect, snapshot: &WidgetSnapshot) {
    if let Some(error) = &snapshot.input_error {
        let paragraph = Paragraph::new(Span::styled(error.clone(), snapshot.styles.input_error));
        frame.render_widget(paragraph, area);
    }
}
