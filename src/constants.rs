//! Application constants for the wallet recharge widget.
//!
//! Timing values, checkout labels, and popup dimensions used throughout the
//! crate.

use std::time::Duration;

// ============================================================================
// Timing Constants
// ============================================================================

/// Delay between a successful payment and the widget closing itself.
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_millis(2000);

/// Interval between host loop ticks.
pub const TICK_RATE: Duration = Duration::from_millis(100);

// ============================================================================
// Checkout Constants
// ============================================================================

/// Merchant name shown in the checkout overlay header.
pub const CHECKOUT_NAME: &str = "Wallet Recharge";

/// Name of the config directory under the platform config root.
pub const APP_NAME: &str = "wallet-recharge";

// ============================================================================
// UI Dimension Constants
// ============================================================================

/// Width of the widget modal (in columns).
pub const MODAL_WIDTH: u16 = 56;

/// Height of the widget modal (in rows).
pub const MODAL_HEIGHT: u16 = 24;

/// Width of the checkout overlay (in columns).
pub const CHECKOUT_WIDTH: u16 = 48;

/// Height of the checkout overlay (in rows).
pub const CHECKOUT_HEIGHT: u16 = 11;
