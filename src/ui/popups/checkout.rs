//! Terminal checkout overlay.
//!
//! Drawn while [`crate::client::TerminalCheckout`] holds a pending request.
//! The customer settles it from the keyboard.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::client::CheckoutRequest;
use crate::constants::{CHECKOUT_HEIGHT, CHECKOUT_WIDTH};
use crate::theme::{MUTED_COLOR, MUTED_STYLE};
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;
use crate::ui::style::StyleSheet;

const HELP_TEXT: &str = "Enter:Pay  f:Fail  Esc:Cancel";

/// Formats minor units as `INR 500.00`.
#[must_use]
pub fn format_charge(request: &CheckoutRequest) -> String {
    format!(
        "{} {}.{:02}",
        request.currency,
        request.amount_minor_units / 100,
        request.amount_minor_units % 100
    )
}

pub fn render(frame: &mut Frame, area: Rect, request: &CheckoutRequest, styles: &StyleSheet) {
    let popup_area = centered_popup_area(area, CHECKOUT_WIDTH, CHECKOUT_HEIGHT);

    let popup_block = create_popup_block(&request.name).border_style(styles.border_focused);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup_block.clone(), popup_area);

    let inner_area = popup_block.inner(popup_area);

    let mut lines = vec![
        Line::from(Span::styled(
            request.description.clone(),
            Style::new().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(format_charge(request), styles.balance_amount)),
    ];
    if let Some(email) = request.prefill.get("email").and_then(|value| value.as_str()) {
        lines.push(Line::from(Span::styled(format!("Paying as {email}"), MUTED_STYLE)));
    }

    let content_area = Rect::new(
        inner_area.x,
        inner_area.y,
        inner_area.width,
        inner_area.height.saturating_sub(2), // Reserve space for help text
    );
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area,
    );

    let separator = "─".repeat(popup_area.width.saturating_sub(2) as usize);
    let separator_area = Rect::new(
        popup_area.x + 1,
        popup_area.y + popup_area.height.saturating_sub(3),
        popup_area.width.saturating_sub(2),
        1,
    );
    frame.render_widget(
        Paragraph::new(separator).style(Style::default().fg(MUTED_COLOR)),
        separator_area,
    );

    let help_area = Rect::new(
        popup_area.x + 1,
        popup_area.y + popup_area.height.saturating_sub(2),
        popup_area.width.saturating_sub(2),
        1,
    );
    frame.render_widget(
        Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(MUTED_COLOR))
            .alignment(Alignment::Center),
        help_area,
    );
}

// ============================================================================
// Tests
// ============================================================================
