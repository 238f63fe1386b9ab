//! Checkout provider abstraction.
//!
//! A [`PaymentGateway`] opens a third-party checkout overlay for one attempt
//! and reports the outcome through the [`GatewayEvents`] handle it was given.
//! The gateway's client library is loaded lazily, once per process, through a
//! [`LibraryGate`].

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{OnceCell, mpsc};

use crate::domain::{GatewayError, Metadata, PaymentError, PaymentResult};
use crate::state::WidgetMessage;

// ============================================================================
// Checkout Request
// ============================================================================

/// Everything the gateway needs to open a checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Gateway credential (publishable key).
    pub credential: String,
    /// Amount in minor currency units.
    pub amount_minor_units: u64,
    /// ISO currency code.
    pub currency: String,
    /// Merchant-facing name shown in the overlay header.
    pub name: String,
    /// Human readable description, e.g. `Add ₹500 to wallet`.
    pub description: String,
    /// Attempt metadata, forwarded as gateway notes.
    pub notes: Metadata,
    /// Customer details taken from the metadata.
    pub prefill: Metadata,
    /// Accent colour for the overlay.
    pub theme_color: String,
}

// ============================================================================
// Gateway Events
// ============================================================================

/// Outcome reported by the gateway for one attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    /// The customer completed the payment.
    Succeeded(PaymentResult),
    /// The payment was attempted and failed.
    Failed(PaymentError),
    /// The customer closed the overlay without paying.
    Dismissed,
    /// The library failed to load or the checkout failed to open.
    InitFailed(GatewayError),
}

/// Handle through which a gateway reports the outcome of one attempt.
///
/// Each handle is bound to the attempt id it was created for, so outcomes of
/// abandoned attempts can be told apart from the live one.
#[derive(Debug, Clone)]
pub struct GatewayEvents {
    attempt: u64,
    tx: mpsc::UnboundedSender<WidgetMessage>,
}

impl GatewayEvents {
    #[must_use]
    pub fn new(attempt: u64, tx: mpsc::UnboundedSender<WidgetMessage>) -> Self {
        Self { attempt, tx }
    }

    #[must_use]
    pub const fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn succeeded(&self, result: PaymentResult) {
        self.emit(GatewayEvent::Succeeded(result));
    }

    pub fn failed(&self, error: PaymentError) {
        self.emit(GatewayEvent::Failed(error));
    }

    pub fn dismissed(&self) {
        self.emit(GatewayEvent::Dismissed);
    }

    pub(crate) fn init_failed(&self, error: GatewayError) {
        self.emit(GatewayEvent::InitFailed(error));
    }

    fn emit(&self, event: GatewayEvent) {
        // Receiver is gone once the widget is destroyed - safe to ignore
        let _ = self.tx.send(WidgetMessage::Gateway {
            attempt: self.attempt,
            event,
        });
    }
}

// ============================================================================
// Trait
// ============================================================================

/// An external checkout provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Loads the provider's client library.
    ///
    /// Called through [`LibraryGate::ensure_loaded`], which memoizes success.
    async fn load_library(&self) -> Result<(), GatewayError>;

    /// Opens the checkout overlay for `request`.
    ///
    /// The outcome is reported later through `events`. An `Err` means the
    /// overlay could not be constructed and no event will follow.
    fn open(&self, request: CheckoutRequest, events: GatewayEvents) -> Result<(), GatewayError>;
}

// ============================================================================
// Library Gate
// ============================================================================

/// Memoizes the gateway library load.
///
/// Only a successful load is remembered; after a failure the next attempt
/// tries again.
#[derive(Debug, Default)]
pub struct LibraryGate {
    loaded: OnceCell<()>,
}

impl LibraryGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaded: OnceCell::new(),
        }
    }

    /// Process-wide gate shared by every widget instance.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<LibraryGate>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Loads the library through `gateway` unless a previous load succeeded.
    ///
    /// # Errors
    ///
    /// Propagates the gateway's `GatewayError` when loading fails.
    pub async fn ensure_loaded(&self, gateway: &dyn PaymentGateway) -> Result<(), GatewayError> {
        self.loaded
            .get_or_try_init(|| async {
                tracing::debug!("Loading payment gateway library");
                gateway.load_library().await
            })
            .await
            .map(|_| ())
    }
}

// ============================================================================
// Tests
// ============================================================================
