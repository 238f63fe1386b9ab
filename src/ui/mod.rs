//! UI rendering module for the wallet recharge widget.
//!
//! This module provides the main rendering entry point. Rendering is a pure
//! function of a [`WidgetSnapshot`] plus the pending checkout, if any.
//!
//! # Module Structure
//!
//! - `panels` - Widget sections (balance, amounts, pay button)
//! - `popups` - Modal overlays (terminal checkout)
//! - `layout` - Layout calculations and structs
//! - `helpers` - Shared helper functions for creating styled blocks
//! - `style` - Shared, reference-counted style sheet

pub mod helpers;
pub mod layout;
pub mod panels;
pub mod popups;
pub mod style;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Clear, Paragraph},
};

use crate::client::CheckoutRequest;
use crate::constants::{MODAL_HEIGHT, MODAL_WIDTH};
use crate::state::WidgetSnapshot;
use crate::theme::MUTED_STYLE;

use helpers::create_popup_block;
use layout::{calculate_widget_layout, centered_popup_area};

const CLOSED_HINT: &str = "Widget closed  o:Open  q:Quit";
const WIDGET_HELP: &str = "Tab:Next  ←→:Preset  Enter:Pay  r:Balance  Esc:Close";

// ============================================================================
// Main Render Entry Point
// ============================================================================

/// Main render function.
///
/// Draws the closed hint or the widget modal, then the checkout overlay on
/// top when one is pending.
pub fn render(snapshot: &WidgetSnapshot, checkout: Option<&CheckoutRequest>, frame: &mut Frame) {
    let area = frame.area();

    if snapshot.visible {
        render_widget(frame, area, snapshot);
    } else {
        render_closed_hint(frame, area);
    }

    if let Some(request) = checkout {
        popups::checkout::render(frame, area, request, &snapshot.styles);
    }
}

fn render_closed_hint(frame: &mut Frame, area: Rect) {
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    let hint = Paragraph::new(CLOSED_HINT)
        .style(MUTED_STYLE)
        .alignment(Alignment::Center);
    frame.render_widget(hint, row);
}

fn render_widget(frame: &mut Frame, area: Rect, snapshot: &WidgetSnapshot) {
    let modal_area = centered_popup_area(area, MODAL_WIDTH, MODAL_HEIGHT);
    let modal_block = create_popup_block(&snapshot.title);

    frame.render_widget(Clear, modal_area);
    frame.render_widget(modal_block.clone(), modal_area);

    let layout = calculate_widget_layout(modal_block.inner(modal_area));

    frame.render_widget(
        Paragraph::new(snapshot.subtitle.as_str())
            .style(MUTED_STYLE)
            .alignment(Alignment::Center),
        layout.subtitle,
    );

    panels::balance::render(frame, layout.balance, snapshot);
    panels::amounts::render_presets(frame, layout.presets, snapshot);
    panels::amounts::render_input(frame, layout.input, snapshot);
    panels::amounts::render_error(frame, layout.input_error, snapshot);
    panels::payment::render_button(frame, layout.button, snapshot);
    panels::payment::render_status(frame, layout.status, snapshot);

    frame.render_widget(
        Paragraph::new(WIDGET_HELP)
            .style(MUTED_STYLE)
            .alignment(Alignment::Center),
        layout.help,
    );
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BalanceView, Focus, PresetView, StatusKind, StatusView};
    use crate::test_utils::CheckoutRequestMother;
    use crate::ui::style::StyleSheet;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::sync::Arc;

    fn sample_snapshot() -> WidgetSnapshot {
        WidgetSnapshot {
            visible: true,
            title: "Wallet Recharge".to_string(),
            subtitle: "Add money to your wallet".to_string(),
            balance_title: "Available Balance".to_string(),
            balance: BalanceView::Loaded("₹250".to_string()),
            presets: vec![
                PresetView {
                    label: "₹100".to_string(),
                    selected: false,
                    highlighted: true,
                },
                PresetView {
                    label: "₹500".to_string(),
                    selected: true,
                    highlighted: false,
                },
            ],
            custom_amount_label: "Custom Amount".to_string(),
            currency_symbol: "₹".to_string(),
            input_text: "500".to_string(),
            input_error: None,
            button_label: "Pay Now".to_string(),
            processing: false,
            status: None,
            focus: Focus::Presets,
            styles: Arc::new(StyleSheet::default()),
        }
    }

    fn draw(snapshot: &WidgetSnapshot, checkout: Option<&CheckoutRequest>) -> Buffer {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(snapshot, checkout, frame))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    /// The first row containing `needle`, stripped of surrounding borders.
    fn row_with(buffer: &Buffer, needle: &str) -> Option<String> {
        rows(buffer)
            .into_iter()
            .find(|row| row.contains(needle))
            .map(|row| {
                row.trim()
                    .trim_matches(|c| matches!(c, '│' | '║'))
                    .trim()
                    .to_string()
            })
    }

    #[test]
    fn test_render_closed_shows_hint_only() {
        let snapshot = WidgetSnapshot {
            visible: false,
            ..sample_snapshot()
        };
        let buffer = draw(&snapshot, None);

        insta::assert_snapshot!(row_with(&buffer, "closed").unwrap(), @"Widget closed  o:Open  q:Quit");
        assert!(row_with(&buffer, "Pay Now").is_none());
    }

    #[test]
    fn test_render_widget_sections() {
        let buffer = draw(&sample_snapshot(), None);

        insta::assert_snapshot!(row_with(&buffer, "₹100").unwrap(), @"₹100  [₹500]");
        insta::assert_snapshot!(row_with(&buffer, "₹250").unwrap(), @"₹250");
        insta::assert_snapshot!(row_with(&buffer, "Pay Now").unwrap(), @"Pay Now");
        assert!(row_with(&buffer, "Available Balance").is_some());
        assert!(row_with(&buffer, "Custom Amount").is_some());
        assert!(row_with(&buffer, WIDGET_HELP).is_some());
    }

    #[test]
    fn test_render_loading_balance() {
        let snapshot = WidgetSnapshot {
            balance: BalanceView::Loading("Loading balance...".to_string()),
            ..sample_snapshot()
        };
        let buffer = draw(&snapshot, None);

        insta::assert_snapshot!(
            row_with(&buffer, "Loading balance").unwrap(),
            @"░░░░░░░░░░  Loading balance..."
        );
    }

    #[test]
    fn test_render_inline_error_and_processing() {
        let snapshot = WidgetSnapshot {
            input_error: Some("Minimum amount is ₹10".to_string()),
            processing: true,
            button_label: "Processing payment...".to_string(),
            ..sample_snapshot()
        };
        let buffer = draw(&snapshot, None);

        insta::assert_snapshot!(row_with(&buffer, "Minimum").unwrap(), @"Minimum amount is ₹10");
        assert!(row_with(&buffer, "Processing payment...").is_some());
        assert!(row_with(&buffer, "Pay Now").is_none());
    }

    #[test]
    fn test_render_status_banner() {
        let snapshot = WidgetSnapshot {
            status: Some(StatusView {
                kind: StatusKind::Success,
                text: "Payment completed successfully!".to_string(),
            }),
            ..sample_snapshot()
        };
        let buffer = draw(&snapshot, None);

        insta::assert_snapshot!(
            row_with(&buffer, "Payment completed").unwrap(),
            @"Payment completed successfully!"
        );
    }

    #[test]
    fn test_render_focused_input_shows_cursor() {
        let snapshot = WidgetSnapshot {
            focus: Focus::CustomInput,
            input_text: "75".to_string(),
            ..sample_snapshot()
        };
        let buffer = draw(&snapshot, None);

        insta::assert_snapshot!(row_with(&buffer, "₹ 75").unwrap(), @"₹ 75▏");
        assert!(row_with(&buffer, "● Custom Amount").is_some());
    }

    #[test]
    fn test_render_checkout_over_widget() {
        let request = CheckoutRequestMother::rupees(500);
        let buffer = draw(&sample_snapshot(), Some(&request));

        assert!(row_with(&buffer, "Add ₹500 to wallet").is_some());
        assert!(row_with(&buffer, "INR 500.00").is_some());
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let request = CheckoutRequestMother::rupees(100);
        terminal
            .draw(|frame| render(&sample_snapshot(), Some(&request), frame))
            .unwrap();
    }
}
