//! Widget construction, visibility, and teardown.

use std::time::Instant;

use rust_decimal::Decimal;
use tokio::sync::mpsc;

use super::{
    AmountSelector, BalanceTracker, PaymentSession, UiState, Visibility, Widget, WidgetCallbacks,
    WidgetConfig, WidgetDeps,
};
use crate::domain::WidgetError;
use crate::ui::style::StyleLease;

impl Widget {
    /// Creates a hidden widget and takes a lease on the shared style sheet.
    #[must_use]
    pub fn new(config: WidgetConfig, callbacks: WidgetCallbacks, deps: WidgetDeps) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let amount = AmountSelector::new(config.amounts.clone(), config.currency.clone());
        let balance = BalanceTracker::new(
            config.balance_source().map(str::to_string),
            config.balance,
            deps.balance_provider,
        );
        let payment = PaymentSession::new(deps.gateway, deps.library);
        let style = StyleLease::acquire(config.theme.palette());

        Self {
            config,
            callbacks,
            amount,
            balance,
            payment,
            ui: UiState::default(),
            visibility: Visibility::Hidden,
            auto_close_at: None,
            style: Some(style),
            destroyed: false,
            message_tx,
            message_rx,
        }
    }

    pub(crate) fn ensure_alive(&self) -> Result<(), WidgetError> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        Ok(())
    }

    /// Shows the modal, fetching the balance if none is known or loading.
    ///
    /// A finished attempt from a previous opening is cleared.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Destroyed` after [`Widget::destroy`].
    pub fn show(&mut self) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        self.visibility = Visibility::Visible;
        self.payment.reset();

        let balance = self.balance.state();
        if !balance.is_known() && !balance.is_loading() {
            self.balance.fetch(&self.message_tx);
        }
        Ok(())
    }

    /// Hides the modal and notifies `on_close`. Selection and attempt are kept.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Destroyed` after [`Widget::destroy`].
    pub fn close(&mut self) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        self.visibility = Visibility::Hidden;
        self.auto_close_at = None;
        self.callbacks.close();
        Ok(())
    }

    /// Clears the amount selection, any inline error, and a finished attempt.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Destroyed` after [`Widget::destroy`].
    pub fn reset_amount_selection(&mut self) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        self.amount.reset();
        self.payment.reset();
        self.ui.reset();
        Ok(())
    }

    /// Injects a balance, overriding whatever is displayed.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Destroyed` after [`Widget::destroy`].
    pub fn set_balance(&mut self, amount: Decimal) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        self.balance.set_balance(amount);
        Ok(())
    }

    /// Re-fetches the balance from the configured source.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Destroyed` after [`Widget::destroy`].
    pub fn refresh_balance(&mut self) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        self.balance.fetch(&self.message_tx);
        Ok(())
    }

    /// Advances timers. Closes the widget once a scheduled auto-close is due.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Destroyed` after [`Widget::destroy`].
    pub fn tick(&mut self, now: Instant) -> Result<(), WidgetError> {
        self.ensure_alive()?;
        if self.auto_close_at.is_some_and(|deadline| now >= deadline) {
            tracing::debug!("Auto-closing after successful payment");
            self.close()?;
        }
        Ok(())
    }

    /// Releases the style lease and the message channel. Terminal.
    ///
    /// Outcomes of work still in flight are discarded.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        tracing::debug!("Destroying widget");
        self.destroyed = true;
        self.visibility = Visibility::Hidden;
        self.auto_close_at = None;
        self.style = None;
        self.message_rx.close();
    }
}
