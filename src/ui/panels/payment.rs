//! Pay button and status banner.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    symbols::border,
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{Focus, StatusKind, WidgetSnapshot};

pub fn render_button(frame: &mut Frame, area: Rect, snapshot: &WidgetSnapshot) {
    let styles = &snapshot.styles;
    let style = if snapshot.processing {
        styles.button_busy
    } else if snapshot.focus == Focus::PayButton {
        styles.button_focused
    } else {
        styles.button
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(style);

    let button = Paragraph::new(snapshot.button_label.as_str())
        .alignment(Alignment::Center)
        .style(style)
        .block(block);

    frame.render_widget(button, area);
}

pub fn render_status(frame: &mut Frame, area: Rect, snapshot: &WidgetSnapshot) {
    let Some(status) = &snapshot.status else {
        return;
    };

    let style = match status.kind {
        StatusKind::Success => snapshot.styles.success_banner,
        StatusKind::Error => snapshot.styles.error_banner,
    };

    let banner =
        Paragraph::new(Span::styled(status.text.clone(), style)).alignment(Alignment::Center);
    frame.render_widget(banner, area);
}
