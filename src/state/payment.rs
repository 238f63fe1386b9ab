//! Payment attempt lifecycle.
//!
//! `Idle → Processing → Succeeded | Failed`. Terminal states persist until
//! [`PaymentSession::reset`]. A dismissed overlay or a gateway that fails to
//! come up returns the session to `Idle`.
//!
//! Every attempt gets a fresh id. Gateway events are tagged with the id of
//! the attempt they belong to, and events for anything other than the live
//! `Processing` attempt are dropped.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::mpsc;

use super::{WidgetCallbacks, WidgetMessage};
use crate::client::{CheckoutRequest, GatewayEvent, GatewayEvents, LibraryGate, PaymentGateway};
use crate::constants::CHECKOUT_NAME;
use crate::domain::{
    Currency, FailurePayload, GatewayError, Metadata, PaymentError, PaymentResult, SessionError,
    SuccessPayload, prefill_from,
};

// ============================================================================
// Types
// ============================================================================

/// The single payment attempt owned by a widget.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PaymentAttempt {
    #[default]
    Idle,
    Processing {
        amount: Decimal,
    },
    Succeeded {
        result: PaymentResult,
        amount: Decimal,
    },
    Failed {
        error: PaymentError,
        amount: Decimal,
    },
}

impl PaymentAttempt {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

/// Per-attempt checkout settings taken from the widget config.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub credential: String,
    pub currency: Currency,
    pub theme_color: String,
}

impl CheckoutSettings {
    /// Builds the gateway request for `amount`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Initialization` if the amount cannot be
    /// expressed in minor units.
    pub fn request(
        &self,
        amount: Decimal,
        metadata: &Metadata,
    ) -> Result<CheckoutRequest, GatewayError> {
        let amount_minor_units = Currency::to_minor_units(amount)
            .ok_or_else(|| GatewayError::initialization(format!("amount {amount} out of range")))?;

        Ok(CheckoutRequest {
            credential: self.credential.clone(),
            amount_minor_units,
            currency: self.currency.code().to_string(),
            name: CHECKOUT_NAME.to_string(),
            description: format!("Add {} to wallet", self.currency.format(amount)),
            notes: metadata.clone(),
            prefill: prefill_from(metadata),
            theme_color: self.theme_color.clone(),
        })
    }
}

/// What applying a gateway event did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Event belonged to a stale attempt; nothing changed.
    Ignored,
    Succeeded,
    Failed,
    Dismissed,
    /// The overlay never came up; the session is back to `Idle`.
    InitFailed(GatewayError),
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug)]
pub struct PaymentSession {
    attempt: PaymentAttempt,
    attempt_id: u64,
    metadata: Metadata,
    currency: Currency,
    gateway: Arc<dyn PaymentGateway>,
    library: Arc<LibraryGate>,
}

impl PaymentSession {
    #[must_use]
    pub fn new(gateway: Arc<dyn PaymentGateway>, library: Arc<LibraryGate>) -> Self {
        Self {
            attempt: PaymentAttempt::Idle,
            attempt_id: 0,
            metadata: Metadata::new(),
            currency: Currency::default(),
            gateway,
            library,
        }
    }

    #[must_use]
    pub fn attempt(&self) -> &PaymentAttempt {
        &self.attempt
    }

    /// Id of the most recent attempt (0 before the first).
    #[must_use]
    pub const fn attempt_id(&self) -> u64 {
        self.attempt_id
    }

    /// Metadata sent with the most recent attempt.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Starts an attempt and opens the gateway in the background.
    ///
    /// Returns the new attempt id.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyProcessing` unless the session is `Idle`;
    /// the current attempt is left untouched.
    pub fn begin(
        &mut self,
        amount: Decimal,
        metadata: Metadata,
        checkout: &CheckoutSettings,
        tx: &mpsc::UnboundedSender<WidgetMessage>,
    ) -> Result<u64, SessionError> {
        if !self.attempt.is_idle() {
            return Err(SessionError::AlreadyProcessing);
        }

        self.attempt_id += 1;
        self.attempt = PaymentAttempt::Processing { amount };
        self.currency = checkout.currency.clone();
        let request = checkout.request(amount, &metadata);
        self.metadata = metadata;

        tracing::info!(attempt = self.attempt_id, %amount, "Payment attempt started");

        let events = GatewayEvents::new(self.attempt_id, tx.clone());
        let gateway = Arc::clone(&self.gateway);
        let library = Arc::clone(&self.library);
        tokio::spawn(async move {
            if let Err(err) = library.ensure_loaded(gateway.as_ref()).await {
                events.init_failed(err);
                return;
            }
            let opened = request.and_then(|request| gateway.open(request, events.clone()));
            if let Err(err) = opened {
                events.init_failed(err);
            }
        });

        Ok(self.attempt_id)
    }

    /// Applies a gateway event, invoking the matching host callback.
    pub fn handle_event(
        &mut self,
        attempt_id: u64,
        event: GatewayEvent,
        callbacks: &WidgetCallbacks,
    ) -> SessionOutcome {
        let PaymentAttempt::Processing { amount } = self.attempt else {
            tracing::debug!(attempt_id, "Ignoring gateway event outside of processing");
            return SessionOutcome::Ignored;
        };
        if attempt_id != self.attempt_id {
            tracing::debug!(attempt_id, live = self.attempt_id, "Ignoring stale gateway event");
            return SessionOutcome::Ignored;
        }

        match event {
            GatewayEvent::Succeeded(result) => {
                tracing::info!(payment_id = %result.payment_id, "Payment succeeded");
                let payload = SuccessPayload {
                    payment_id: result.payment_id.clone(),
                    order_id: result.order_id.clone(),
                    signature: result.signature.clone(),
                    amount,
                    currency: self.currency.code().to_string(),
                    custom_data: self.metadata.clone(),
                };
                self.attempt = PaymentAttempt::Succeeded { result, amount };
                callbacks.success(&payload);
                SessionOutcome::Succeeded
            }
            GatewayEvent::Failed(error) => {
                tracing::warn!("Payment failed: {error}");
                let payload = FailurePayload::new(error.clone(), amount, self.metadata.clone());
                self.attempt = PaymentAttempt::Failed { error, amount };
                callbacks.failure(&payload);
                SessionOutcome::Failed
            }
            GatewayEvent::Dismissed => {
                tracing::info!("Checkout dismissed");
                self.attempt = PaymentAttempt::Idle;
                callbacks.close();
                SessionOutcome::Dismissed
            }
            GatewayEvent::InitFailed(err) => {
                tracing::warn!(reason = err.reason(), "{err}");
                self.attempt = PaymentAttempt::Idle;
                SessionOutcome::InitFailed(err)
            }
        }
    }

    /// Returns a terminal attempt to `Idle`. A processing attempt is kept.
    ///
    /// Returns whether anything changed.
    pub fn reset(&mut self) -> bool {
        if !self.attempt.is_terminal() {
            return false;
        }
        self.attempt = PaymentAttempt::Idle;
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
