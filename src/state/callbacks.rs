//! Host callbacks.
//!
//! Each callback is optional. They run synchronously on the task that applies
//! the widget's messages.

use std::fmt;

use rust_decimal::Decimal;

use crate::domain::{BalanceError, FailurePayload, SuccessPayload};

/// The callback set supplied alongside the widget config.
///
/// # Example
///
/// ```ignore
/// let callbacks = WidgetCallbacks::new()
///     .on_success(|payment| tracing::info!(payment_id = %payment.payment_id, "paid"))
///     .on_close(|| tracing::info!("closed"));
/// ```
#[derive(Default)]
pub struct WidgetCallbacks {
    on_success: Option<Box<dyn Fn(&SuccessPayload) + Send>>,
    on_failure: Option<Box<dyn Fn(&FailurePayload) + Send>>,
    on_close: Option<Box<dyn Fn() + Send>>,
    on_balance_loaded: Option<Box<dyn Fn(Decimal) + Send>>,
    on_balance_error: Option<Box<dyn Fn(&BalanceError) + Send>>,
}

impl WidgetCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_success(mut self, f: impl Fn(&SuccessPayload) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_failure(mut self, f: impl Fn(&FailurePayload) + Send + 'static) -> Self {
        self.on_failure = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_close(mut self, f: impl Fn() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_balance_loaded(mut self, f: impl Fn(Decimal) + Send + 'static) -> Self {
        self.on_balance_loaded = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_balance_error(mut self, f: impl Fn(&BalanceError) + Send + 'static) -> Self {
        self.on_balance_error = Some(Box::new(f));
        self
    }

    pub(crate) fn success(&self, payload: &SuccessPayload) {
        if let Some(f) = &self.on_success {
            f(payload);
        }
    }

    pub(crate) fn failure(&self, payload: &FailurePayload) {
        if let Some(f) = &self.on_failure {
            f(payload);
        }
    }

    pub(crate) fn close(&self) {
        if let Some(f) = &self.on_close {
            f();
        }
    }

    pub(crate) fn balance_loaded(&self, amount: Decimal) {
        if let Some(f) = &self.on_balance_loaded {
            f(amount);
        }
    }

    pub(crate) fn balance_error(&self, error: &BalanceError) {
        if let Some(f) = &self.on_balance_error {
            f(error);
        }
    }
}

impl fmt::Debug for WidgetCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetCallbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_balance_loaded", &self.on_balance_loaded.is_some())
            .field("on_balance_error", &self.on_balance_error.is_some())
            .finish()
    }
}
