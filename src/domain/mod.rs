//! Domain types for the wallet recharge widget.
//!
//! - [`error`] - Error taxonomy (validation, configuration, gateway, balance)
//! - [`currency`] - Currency codes, symbols, minor-unit conversion
//! - [`payment`] - Gateway outcomes, callback payloads, attempt metadata

pub mod currency;
pub mod error;
pub mod payment;

pub use currency::Currency;
pub use error::{
    BalanceError, ConfigError, GatewayError, SessionError, ValidationError, WidgetError,
};
pub use payment::{
    FailurePayload, Metadata, PaymentError, PaymentResult, SuccessPayload, attempt_metadata,
    prefill_from,
};
