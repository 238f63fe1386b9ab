//! Payment outcome types and the payloads handed to host callbacks.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::Currency;

/// Pass-through metadata attached to a payment attempt.
pub type Metadata = Map<String, Value>;

/// Keys of the metadata copied into the checkout prefill block.
pub const PREFILL_KEYS: [&str; 3] = ["email", "contact", "name"];

// ============================================================================
// Gateway Outcomes
// ============================================================================

/// Identifiers returned by the gateway for a completed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub payment_id: String,
    pub order_id: Option<String>,
    pub signature: Option<String>,
}

impl PaymentResult {
    #[must_use]
    pub fn new(payment_id: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
            order_id: None,
            signature: None,
        }
    }
}

/// Structured failure detail reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{code}: {description}")]
pub struct PaymentError {
    pub code: String,
    pub description: String,
    /// Optional machine-readable reason supplied by some gateways.
    pub reason: Option<String>,
}

impl PaymentError {
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            reason: None,
        }
    }
}

// ============================================================================
// Callback Payloads
// ============================================================================

/// Payload for the `on_success` callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessPayload {
    pub payment_id: String,
    pub order_id: Option<String>,
    pub signature: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub custom_data: Metadata,
}

/// Payload for the `on_failure` callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailurePayload {
    pub error: PaymentError,
    pub code: String,
    pub description: String,
    pub amount: Decimal,
    pub custom_data: Metadata,
}

impl FailurePayload {
    #[must_use]
    pub fn new(error: PaymentError, amount: Decimal, custom_data: Metadata) -> Self {
        Self {
            code: error.code.clone(),
            description: error.description.clone(),
            error,
            amount,
            custom_data,
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Builds the metadata for one attempt: the host's custom data plus the
/// widget amount, currency, and the attempt timestamp.
#[must_use]
pub fn attempt_metadata(
    custom_data: &Metadata,
    amount: Decimal,
    currency: &Currency,
    now: DateTime<Utc>,
) -> Metadata {
    let mut metadata = custom_data.clone();
    metadata.insert(
        "widgetAmount".to_string(),
        Value::String(amount.normalize().to_string()),
    );
    metadata.insert(
        "widgetCurrency".to_string(),
        Value::String(currency.code().to_string()),
    );
    metadata.insert(
        "timestamp".to_string(),
        Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    metadata
}

/// Extracts the prefill entries (`email`, `contact`, `name`) that carry a
/// non-empty value.
#[must_use]
pub fn prefill_from(metadata: &Metadata) -> Metadata {
    PREFILL_KEYS
        .iter()
        .filter_map(|key| {
            metadata
                .get(*key)
                .filter(|value| !matches!(value, Value::Null) && value.as_str() != Some(""))
                .map(|value| ((*key).to_string(), value.clone()))
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
