//! In-terminal checkout gateway.
//!
//! Stands in for a hosted checkout overlay when the widget runs in a terminal:
//! `open` parks the request, the UI draws it as a popup, and the customer's
//! key press settles it as paid, declined, or dismissed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::gateway::{CheckoutRequest, GatewayEvents, PaymentGateway};
use crate::domain::{GatewayError, PaymentError, PaymentResult};

#[derive(Debug)]
struct PendingCheckout {
    request: CheckoutRequest,
    events: GatewayEvents,
}

/// Gateway whose overlay is rendered by the terminal UI itself.
///
/// Clones share the same pending checkout, so the host keeps one clone for
/// key handling and hands another to the widget.
#[derive(Debug, Clone, Default)]
pub struct TerminalCheckout {
    pending: Arc<Mutex<Option<PendingCheckout>>>,
}

impl TerminalCheckout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<PendingCheckout>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The checkout currently awaiting the customer, if any.
    #[must_use]
    pub fn pending_request(&self) -> Option<CheckoutRequest> {
        self.slot().as_ref().map(|pending| pending.request.clone())
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.slot().is_some()
    }

    /// Completes the pending checkout successfully. Returns `false` if none is open.
    pub fn pay(&self) -> bool {
        let Some(pending) = self.slot().take() else {
            return false;
        };
        let payment_id = format!("pay_{}", Utc::now().format("%Y%m%d%H%M%S%3f"));
        tracing::info!(%payment_id, "Terminal checkout paid");
        pending.events.succeeded(PaymentResult::new(payment_id));
        true
    }

    /// Fails the pending checkout. Returns `false` if none is open.
    pub fn decline(&self) -> bool {
        let Some(pending) = self.slot().take() else {
            return false;
        };
        tracing::info!("Terminal checkout declined");
        pending.events.failed(PaymentError {
            code: "BAD_REQUEST_ERROR".to_string(),
            description: "Payment declined by customer".to_string(),
            reason: Some("payment_failed".to_string()),
        });
        true
    }

    /// Closes the pending checkout without paying. Returns `false` if none is open.
    pub fn dismiss(&self) -> bool {
        let Some(pending) = self.slot().take() else {
            return false;
        };
        tracing::info!("Terminal checkout dismissed");
        pending.events.dismissed();
        true
    }
}

#[async_trait]
impl PaymentGateway for TerminalCheckout {
    async fn load_library(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    fn open(&self, request: CheckoutRequest, events: GatewayEvents) -> Result<(), GatewayError> {
        if request.amount_minor_units == 0 {
            return Err(GatewayError::initialization("amount must be positive"));
        }
        let mut slot = self.slot();
        if slot.is_some() {
            return Err(GatewayError::initialization("a checkout is already open"));
        }
        *slot = Some(PendingCheckout { request, events });
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::gateway::GatewayEvent;
    use crate::state::WidgetMessage;
    use crate::test_utils::CheckoutRequestMother;
    use tokio::sync::mpsc;

    fn next_event(rx: &mut mpsc::UnboundedReceiver<WidgetMessage>) -> GatewayEvent {
        match rx.try_recv().unwrap() {
            WidgetMessage::Gateway { event, .. } => event,
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_open_then_pay() {
        let checkout = TerminalCheckout::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        checkout
            .open(CheckoutRequestMother::rupees(500), GatewayEvents::new(1, tx))
            .unwrap();
        assert!(checkout.is_open());
        assert_eq!(
            checkout.pending_request().unwrap().amount_minor_units,
            50_000
        );

        assert!(checkout.pay());
        assert!(!checkout.is_open());
        match next_event(&mut rx) {
            GatewayEvent::Succeeded(result) => assert!(result.payment_id.starts_with("pay_")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decline_and_dismiss() {
        let checkout = TerminalCheckout::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        checkout
            .open(CheckoutRequestMother::rupees(100), GatewayEvents::new(1, tx.clone()))
            .unwrap();
        assert!(checkout.decline());
        assert!(matches!(next_event(&mut rx), GatewayEvent::Failed(e) if e.code == "BAD_REQUEST_ERROR"));

        checkout
            .open(CheckoutRequestMother::rupees(100), GatewayEvents::new(2, tx))
            .unwrap();
        assert!(checkout.dismiss());
        assert_eq!(next_event(&mut rx), GatewayEvent::Dismissed);
    }

    #[test]
    fn test_actions_without_pending_checkout() {
        let checkout = TerminalCheckout::new();
        assert!(!checkout.pay());
        assert!(!checkout.decline());
        assert!(!checkout.dismiss());
    }

    #[test]
    fn test_open_rejects_second_checkout() {
        let checkout = TerminalCheckout::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        checkout
            .open(CheckoutRequestMother::rupees(100), GatewayEvents::new(1, tx.clone()))
            .unwrap();

        let err = checkout
            .open(CheckoutRequestMother::rupees(100), GatewayEvents::new(2, tx))
            .unwrap_err();
        assert!(matches!(err, GatewayError::Initialization { .. }));
    }

    #[test]
    fn test_clones_share_pending_checkout() {
        let checkout = TerminalCheckout::new();
        let handle = checkout.clone();
        let (tx, _rx) = mpsc::unbounded_channel();
        checkout
            .open(CheckoutRequestMother::rupees(100), GatewayEvents::new(1, tx))
            .unwrap();
        assert!(handle.is_open());
    }
}
