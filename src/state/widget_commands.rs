//! Amount input, payment submission, and command execution.

use chrono::Utc;
use rust_decimal::Decimal;

use super::{CheckoutSettings, Focus, Widget};
use crate::commands::{InputContext, WidgetCommand};
use crate::domain::{ConfigError, WidgetError, attempt_metadata};

impl Widget {
    /// Selects a preset amount.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Destroyed` after [`Widget::destroy`].
    pub fn select_preset(&mut self, amount: Decimal) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        self.amount.select_preset(amount);
        if let Some(index) = self.amount.presets().iter().position(|p| *p == amount) {
            self.ui.preset_cursor = index;
        }
        Ok(())
    }

    /// Replaces the custom amount text.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Destroyed` after [`Widget::destroy`].
    pub fn set_custom_text(&mut self, raw: &str) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        self.amount.set_custom_text(raw);
        Ok(())
    }

    /// Validates the amount and starts a payment.
    ///
    /// A finished attempt is reset first, so a failed payment can be retried.
    /// While a payment is processing this is a no-op.
    ///
    /// # Errors
    ///
    /// - `Validation` if the amount is missing or out of bounds
    /// - `Config` if no gateway credential is configured
    /// - `Destroyed` after [`Widget::destroy`]
    ///
    /// Validation and config errors are also shown inline.
    pub fn submit(&mut self) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        if self.payment.attempt().is_processing() {
            tracing::debug!("Submit ignored: payment already processing");
            return Ok(());
        }

        let amount = match self
            .amount
            .validate(self.config.min_amount, self.config.max_amount)
        {
            Ok(amount) => amount,
            Err(err) => {
                tracing::debug!("Amount rejected: {err}");
                self.amount.show_error(err.to_string());
                return Err(err.into());
            }
        };

        let Some(credential) = self.config.credential() else {
            let err = ConfigError::MissingCredential;
            tracing::warn!("{err}");
            self.amount.show_error(err.to_string());
            return Err(err.into());
        };

        let checkout = CheckoutSettings {
            credential: credential.to_string(),
            currency: self.config.currency.clone(),
            theme_color: self.config.theme.primary_color.clone(),
        };
        let metadata = attempt_metadata(
            &self.config.custom_data,
            amount,
            &self.config.currency,
            Utc::now(),
        );

        self.payment.reset();
        self.auto_close_at = None;
        self.payment
            .begin(amount, metadata, &checkout, &self.message_tx)?;
        Ok(())
    }

    /// The keybinding context for the widget's current state.
    #[must_use]
    pub fn input_context(&self) -> InputContext {
        if !self.is_visible() {
            return InputContext::Hidden;
        }
        match self.ui.focus {
            Focus::Presets => InputContext::Presets,
            Focus::CustomInput => InputContext::CustomInput,
            Focus::PayButton => InputContext::PayButton,
        }
    }

    /// Executes a widget command.
    ///
    /// `Quit` and the checkout commands belong to the host and are ignored.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub fn apply(&mut self, command: WidgetCommand) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        match command {
            WidgetCommand::Show => self.show(),
            WidgetCommand::CloseAndReset => {
                self.close()?;
                self.reset_amount_selection()
            }
            WidgetCommand::RefreshBalance => self.refresh_balance(),
            WidgetCommand::CycleFocus => {
                self.ui.cycle_focus();
                Ok(())
            }
            WidgetCommand::CycleFocusBack => {
                self.ui.cycle_focus_back();
                Ok(())
            }
            WidgetCommand::PresetLeft => {
                self.ui.cursor_left(self.amount.presets().len());
                Ok(())
            }
            WidgetCommand::PresetRight => {
                self.ui.cursor_right(self.amount.presets().len());
                Ok(())
            }
            WidgetCommand::SelectPreset => {
                match self.amount.presets().get(self.ui.preset_cursor).copied() {
                    Some(amount) => self.select_preset(amount),
                    None => Ok(()),
                }
            }
            WidgetCommand::TypeChar(c) => {
                // Typing from another control starts a fresh amount
                let mut text = if self.ui.focus == Focus::CustomInput {
                    self.amount.input_text()
                } else {
                    String::new()
                };
                self.ui.focus = Focus::CustomInput;
                text.push(c);
                self.set_custom_text(&text)
            }
            WidgetCommand::Backspace => {
                let mut text = self.amount.input_text();
                text.pop();
                self.set_custom_text(&text)
            }
            WidgetCommand::Submit => self.submit(),
            WidgetCommand::Quit
            | WidgetCommand::CheckoutPay
            | WidgetCommand::CheckoutDecline
            | WidgetCommand::CheckoutDismiss
            | WidgetCommand::Noop => Ok(()),
        }
    }
}
