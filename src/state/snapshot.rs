//! Immutable render snapshots.
//!
//! The UI never reads widget state directly; it draws a [`WidgetSnapshot`],
//! which already carries resolved texts, labels, and styles.

use std::sync::Arc;

use super::{BalanceState, Focus, PaymentAttempt, Widget};
use crate::ui::style::StyleSheet;

/// One preset button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetView {
    /// Formatted amount, e.g. `₹500`.
    pub label: String,
    pub selected: bool,
    /// Under the keyboard cursor while the preset row has focus.
    pub highlighted: bool,
}

/// The balance panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceView {
    /// Nothing fetched yet.
    Unknown,
    /// Skeleton with the loading text.
    Loading(String),
    /// Formatted balance.
    Loaded(String),
    /// Placeholder with the error text.
    Errored(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Banner shown after a payment finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub kind: StatusKind,
    pub text: String,
}

/// Everything the UI needs to draw the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub visible: bool,
    pub title: String,
    pub subtitle: String,
    pub balance_title: String,
    pub balance: BalanceView,
    pub presets: Vec<PresetView>,
    pub custom_amount_label: String,
    pub currency_symbol: String,
    pub input_text: String,
    pub input_error: Option<String>,
    pub button_label: String,
    pub processing: bool,
    pub status: Option<StatusView>,
    pub focus: Focus,
    pub styles: Arc<StyleSheet>,
}

impl Widget {
    /// Captures the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> WidgetSnapshot {
        let text = &self.config.text;
        let currency = &self.config.currency;
        let presets_focused = self.ui.focus == Focus::Presets;

        let presets = self
            .amount
            .presets()
            .iter()
            .enumerate()
            .map(|(index, amount)| PresetView {
                label: currency.format(*amount),
                selected: self.amount.is_selected(*amount),
                highlighted: presets_focused && index == self.ui.preset_cursor,
            })
            .collect();

        let balance = match self.balance.state() {
            BalanceState::Unknown => BalanceView::Unknown,
            BalanceState::Loading => BalanceView::Loading(text.balance_loading_text.clone()),
            BalanceState::Loaded(amount) => BalanceView::Loaded(currency.format(*amount)),
            BalanceState::Errored(_) => BalanceView::Errored(text.balance_error_text.clone()),
        };

        let status = match self.payment.attempt() {
            PaymentAttempt::Succeeded { .. } => Some(StatusView {
                kind: StatusKind::Success,
                text: text.success_message.clone(),
            }),
            PaymentAttempt::Failed { .. } => Some(StatusView {
                kind: StatusKind::Error,
                text: text.error_message.clone(),
            }),
            PaymentAttempt::Idle | PaymentAttempt::Processing { .. } => None,
        };

        let processing = self.payment.attempt().is_processing();
        let button_label = if processing {
            text.processing_text.clone()
        } else {
            text.recharge_button.clone()
        };

        let styles = self
            .style
            .as_ref()
            .map_or_else(|| Arc::new(StyleSheet::default()), |lease| Arc::clone(lease.sheet()));

        WidgetSnapshot {
            visible: self.is_visible(),
            title: text.title.clone(),
            subtitle: text.subtitle.clone(),
            balance_title: text.balance_title.clone(),
            balance,
            presets,
            custom_amount_label: text.custom_amount_label.clone(),
            currency_symbol: currency.symbol().to_string(),
            input_text: self.amount.input_text(),
            input_error: self.amount.error().map(str::to_string),
            button_label,
            processing,
            status,
            focus: self.ui.focus,
            styles,
        }
    }
}
