//! Error types for the recharge widget.
//!
//! Every failure the widget can hit is recoverable: validation and configuration
//! problems become inline messages, gateway and balance failures are reported
//! through callbacks and status panels. None of these errors is fatal.

use rust_decimal::Decimal;
use thiserror::Error;

// ============================================================================
// Validation
// ============================================================================

/// Amount validation failures, surfaced inline under the custom amount input.
///
/// These never reach the host callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing numeric is selected, or the amount is zero or negative.
    #[error("Please select or enter a valid amount")]
    NoAmount,

    /// The resolved amount is below the configured minimum.
    #[error("Minimum amount is {symbol}{min}")]
    BelowMinimum {
        /// Display symbol of the widget currency.
        symbol: String,
        /// The configured lower bound.
        min: Decimal,
    },

    /// The resolved amount is above the configured maximum.
    #[error("Maximum amount is {symbol}{max}")]
    AboveMaximum {
        /// Display symbol of the widget currency.
        symbol: String,
        /// The configured upper bound.
        max: Decimal,
    },
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration problems detected when a payment is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No gateway credential was supplied.
    #[error("Payment gateway API key not configured")]
    MissingCredential,
}

// ============================================================================
// Gateway
// ============================================================================

/// Failures raised while bringing up the checkout overlay.
///
/// The `Display` text is what the widget shows inline; the `reason` carries
/// the underlying detail for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The gateway client library could not be loaded.
    #[error("Failed to load payment gateway")]
    LibraryLoad {
        /// Underlying cause.
        reason: String,
    },

    /// The checkout could not be constructed or opened.
    #[error("Failed to initialize payment")]
    Initialization {
        /// Underlying cause.
        reason: String,
    },
}

impl GatewayError {
    /// Create a library load error.
    #[must_use]
    pub fn library_load(reason: impl Into<String>) -> Self {
        Self::LibraryLoad {
            reason: reason.into(),
        }
    }

    /// Create an initialization error.
    #[must_use]
    pub fn initialization(reason: impl Into<String>) -> Self {
        Self::Initialization {
            reason: reason.into(),
        }
    }

    /// The underlying cause, for logging.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::LibraryLoad { reason } | Self::Initialization { reason } => reason,
        }
    }
}

// ============================================================================
// Balance
// ============================================================================

/// Failures while retrieving the wallet balance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// Neither a balance endpoint nor a seed balance is available.
    #[error("no source configured")]
    NotConfigured,

    /// The request could not be sent or the body could not be read.
    #[error("Failed to fetch balance: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("Failed to fetch balance: HTTP {0}")]
    Status(u16),

    /// The payload carried no usable balance field.
    #[error("Malformed balance response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for BalanceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

// ============================================================================
// Session / Widget
// ============================================================================

/// Rejections from the payment session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A payment attempt is already in flight or awaiting reset.
    #[error("A payment is already being processed")]
    AlreadyProcessing,
}

/// Errors returned by the public widget API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The widget was destroyed; no further calls are valid.
    #[error("widget has been destroyed")]
    Destroyed,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl WidgetError {
    /// Convert to a `color_eyre::Report` for the application layer.
    #[must_use = "this converts the error into a Report for display"]
    pub fn into_report(self) -> color_eyre::Report {
        color_eyre::eyre::eyre!("{}", self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::NoAmount.to_string(),
            "Please select or enter a valid amount"
        );

        let below = ValidationError::BelowMinimum {
            symbol: "₹".to_string(),
            min: Decimal::from(10),
        };
        assert_eq!(below.to_string(), "Minimum amount is ₹10");

        let above = ValidationError::AboveMaximum {
            symbol: "USD".to_string(),
            max: Decimal::from(50_000),
        };
        assert_eq!(above.to_string(), "Maximum amount is USD50000");
    }

    #[test]
    fn test_gateway_error_keeps_reason_out_of_display() {
        let err = GatewayError::library_load("script 404");
        assert_eq!(err.to_string(), "Failed to load payment gateway");
        assert_eq!(err.reason(), "script 404");

        let err = GatewayError::initialization("bad options");
        assert_eq!(err.to_string(), "Failed to initialize payment");
        assert_eq!(err.reason(), "bad options");
    }

    #[test]
    fn test_balance_error_display() {
        assert_eq!(BalanceError::NotConfigured.to_string(), "no source configured");
        assert_eq!(
            BalanceError::Status(503).to_string(),
            "Failed to fetch balance: HTTP 503"
        );
    }

    #[test]
    fn test_widget_error_wraps_transparently() {
        let err: WidgetError = ValidationError::NoAmount.into();
        assert_eq!(err.to_string(), "Please select or enter a valid amount");

        let err: WidgetError = ConfigError::MissingCredential.into();
        assert!(matches!(err, WidgetError::Config(ConfigError::MissingCredential)));

        let report = WidgetError::Destroyed.into_report();
        assert_eq!(report.to_string(), "widget has been destroyed");
    }
}
