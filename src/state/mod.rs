//! State management for the wallet recharge widget.
//!
//! The widget state is decomposed into independent components:
//!
//! - [`AmountSelector`] - Preset / custom amount resolution and validation
//! - [`BalanceTracker`] - Asynchronous balance retrieval lifecycle
//! - [`PaymentSession`] - The single payment attempt and its outcome
//! - [`UiState`] - Keyboard focus and preset cursor
//! - [`WidgetConfig`] - Construction-time configuration with load/save
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                          Widget                          │
//! ├────────────────┬────────────────┬────────────────┬───────┤
//! │ AmountSelector │ BalanceTracker │ PaymentSession │UiState│
//! │  - selection   │  - state       │  - attempt     │ focus │
//! │  - error       │  - in flight   │  - attempt id  │cursor │
//! └────────────────┴────────────────┴────────────────┴───────┘
//!         ▲                 │                │
//!         │      WidgetMessage (mpsc)        │
//!         └─────── process_messages ◄────────┘
//! ```
//!
//! Background work (balance requests, gateway outcomes) reports back over an
//! unbounded channel; [`Widget::process_messages`] applies the results on the
//! owning task. Rendering reads an immutable [`WidgetSnapshot`].
//!
//! # Example
//!
//! ```ignore
//! use wallet_recharge::state::{Widget, WidgetCallbacks, WidgetConfig, WidgetDeps};
//!
//! let mut widget = Widget::new(WidgetConfig::load(), WidgetCallbacks::new(), deps);
//! widget.show()?;
//! ```

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use tokio::sync::mpsc;

use crate::client::{BalanceProvider, GatewayEvent, LibraryGate, PaymentGateway};
use crate::domain::BalanceError;
use crate::ui::style::StyleLease;

// ============================================================================
// Module Declarations
// ============================================================================

mod widget_commands;
mod widget_lifecycle;
mod widget_messages;

pub mod amount;
pub mod balance;
pub mod callbacks;
pub mod config;
pub mod payment;
pub mod snapshot;
pub mod ui_state;


// ============================================================================
// Re-exports
// ============================================================================

pub use amount::{AmountSelection, AmountSelector};
pub use balance::{BalanceState, BalanceTracker};
pub use callbacks::WidgetCallbacks;
pub use config::{TextConfig, ThemeConfig, WidgetConfig};
pub use payment::{CheckoutSettings, PaymentAttempt, PaymentSession, SessionOutcome};
pub use snapshot::{BalanceView, PresetView, StatusKind, StatusView, WidgetSnapshot};
pub use ui_state::{Focus, UiState};

// ============================================================================
// Widget Message Types
// ============================================================================

/// Results delivered from background tasks to the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetMessage {
    /// A balance request finished.
    BalanceFetched(Result<Decimal, BalanceError>),
    /// The gateway reported on an attempt.
    Gateway { attempt: u64, event: GatewayEvent },
}

// ============================================================================
// Dependencies
// ============================================================================

/// External collaborators injected at construction.
#[derive(Debug, Clone)]
pub struct WidgetDeps {
    pub balance_provider: Arc<dyn BalanceProvider>,
    pub gateway: Arc<dyn PaymentGateway>,
    /// Library load memo. Defaults to the process-wide gate.
    pub library: Arc<LibraryGate>,
}

impl WidgetDeps {
    #[must_use]
    pub fn new(balance_provider: Arc<dyn BalanceProvider>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            balance_provider,
            gateway,
            library: LibraryGate::shared(),
        }
    }

    #[must_use]
    pub fn with_library(mut self, library: Arc<LibraryGate>) -> Self {
        self.library = library;
        self
    }
}

// ============================================================================
// Widget
// ============================================================================

/// Whether the modal is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// One embedded recharge widget.
///
/// Owns all sub-state. Every public operation fails with
/// `WidgetError::Destroyed` once [`Widget::destroy`] has run.
#[derive(Debug)]
pub struct Widget {
    pub(crate) config: WidgetConfig,
    pub(crate) callbacks: WidgetCallbacks,
    pub(crate) amount: AmountSelector,
    pub(crate) balance: BalanceTracker,
    pub(crate) payment: PaymentSession,
    pub(crate) ui: UiState,
    pub(crate) visibility: Visibility,
    /// When set, the widget closes itself once this instant has passed.
    pub(crate) auto_close_at: Option<Instant>,
    pub(crate) style: Option<StyleLease>,
    pub(crate) destroyed: bool,
    pub(crate) message_tx: mpsc::UnboundedSender<WidgetMessage>,
    pub(crate) message_rx: mpsc::UnboundedReceiver<WidgetMessage>,
}

impl Widget {
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn amount(&self) -> &AmountSelector {
        &self.amount
    }

    #[must_use]
    pub fn balance(&self) -> &BalanceState {
        self.balance.state()
    }

    #[must_use]
    pub fn attempt(&self) -> &PaymentAttempt {
        self.payment.attempt()
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.ui.focus
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Deadline of a pending auto-close, if one is scheduled.
    #[must_use]
    pub fn auto_close_deadline(&self) -> Option<Instant> {
        self.auto_close_at
    }
}
