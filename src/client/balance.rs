//! Balance retrieval.
//!
//! The widget only needs one number from the host's backend: the current
//! wallet balance. [`HttpBalanceProvider`] reads it from a JSON endpoint that
//! exposes the value under `balance`, `amount`, or `availableBalance`.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::BalanceError;

/// Field names accepted for the balance value, in priority order.
pub const BALANCE_FIELDS: [&str; 3] = ["balance", "amount", "availableBalance"];

/// Request timeout for balance lookups.
const BALANCE_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Trait
// ============================================================================

/// Source of the wallet balance.
#[async_trait]
pub trait BalanceProvider: Send + Sync + std::fmt::Debug {
    /// Retrieves the current balance from `url`.
    async fn fetch_balance(&self, url: &str) -> Result<Decimal, BalanceError>;
}

// ============================================================================
// HTTP Provider
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpBalanceProvider {
    client: Client,
}

impl HttpBalanceProvider {
    /// Creates a provider with its own pooled HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError::Request` if the HTTP client fails to initialize
    /// (e.g., TLS backend unavailable).
    pub fn new() -> Result<Self, BalanceError> {
        let client = Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(BALANCE_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BalanceProvider for HttpBalanceProvider {
    async fn fetch_balance(&self, url: &str) -> Result<Decimal, BalanceError> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .inspect_err(|e| tracing::debug!("Balance request to {url} failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Balance endpoint {url} returned status {status}");
            return Err(BalanceError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BalanceError::Malformed(e.to_string()))?;

        extract_balance(&body)
    }
}

// ============================================================================
// Payload Parsing
// ============================================================================

/// Pulls the balance out of a JSON document.
///
/// The first accepted field holding a usable value wins. Numbers and numeric
/// strings are both accepted; a zero balance is a valid balance.
///
/// # Errors
///
/// Returns `BalanceError::Malformed` if the document is not an object or no
/// accepted field holds a number.
pub fn extract_balance(body: &Value) -> Result<Decimal, BalanceError> {
    let object = body
        .as_object()
        .ok_or_else(|| BalanceError::Malformed("expected a JSON object".to_string()))?;

    BALANCE_FIELDS
        .iter()
        .filter_map(|field| object.get(*field))
        .find_map(parse_decimal)
        .ok_or_else(|| {
            BalanceError::Malformed(format!(
                "none of {} holds a number",
                BALANCE_FIELDS.join(", ")
            ))
        })
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string()))
            .ok(),
        Value::String(text) => Decimal::from_str(text.trim()).ok(),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::balance_field(json!({"balance": 120}), "120")]
    #[case::amount_field(json!({"amount": 250}), "250")]
    #[case::available_field(json!({"availableBalance": "99.50"}), "99.50")]
    #[case::balance_wins(json!({"amount": 1, "balance": 2}), "2")]
    #[case::null_balance_falls_through(json!({"balance": null, "amount": 7}), "7")]
    #[case::zero_is_valid(json!({"balance": 0, "amount": 7}), "0")]
    #[case::fractional(json!({"balance": 10.25}), "10.25")]
    fn test_extract_balance(#[case] body: Value, #[case] expected: &str) {
        assert_eq!(
            extract_balance(&body).unwrap(),
            Decimal::from_str(expected).unwrap()
        );
    }

    #[rstest]
    #[case::not_object(json!([1, 2, 3]))]
    #[case::no_fields(json!({"total": 5}))]
    #[case::non_numeric(json!({"balance": "lots"}))]
    fn test_extract_balance_malformed(#[case] body: Value) {
        assert!(matches!(
            extract_balance(&body),
            Err(BalanceError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_http_provider_reports_unreachable_host() {
        let provider = HttpBalanceProvider::new().unwrap();
        let result = provider.fetch_balance("http://127.0.0.1:9/balance").await;
        assert!(matches!(result, Err(BalanceError::Request(_))));
    }
}
