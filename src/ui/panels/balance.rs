//! Balance panel.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{BalanceView, WidgetSnapshot};
use crate::theme::{MUTED_STYLE, SKELETON_STYLE};
use crate::ui::helpers::{create_section_block, skeleton};

/// Width of the loading skeleton in cells.
const SKELETON_WIDTH: usize = 10;

/// Placeholder shown when no balance is known.
const NO_BALANCE: &str = "--";

pub fn render(frame: &mut Frame, area: Rect, snapshot: &WidgetSnapshot) {
    let styles = &snapshot.styles;
    let block = create_section_block(&snapshot.balance_title, false, styles);

    let line = match &snapshot.balance {
        BalanceView::Loaded(amount) => {
            Line::from(Span::styled(amount.clone(), styles.balance_amount))
        }
        BalanceView::Loading(text) => Line::from(vec![
            Span::styled(skeleton(SKELETON_WIDTH), SKELETON_STYLE),
            Span::raw("  "),
            Span::styled(text.clone(), MUTED_STYLE),
        ]),
        BalanceView::Errored(text) => Line::from(vec![
            Span::styled(NO_BALANCE, MUTED_STYLE),
            Span::raw("  "),
            Span::styled(text.clone(), styles.input_error),
        ]),
        BalanceView::Unknown => Line::from(Span::styled(NO_BALANCE, MUTED_STYLE)),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
