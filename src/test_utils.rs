//! Shared test utilities and Mother pattern factories.
//!
//! Hand-written collaborators (`MockGateway`, `MockBalanceProvider`), a
//! callback recorder, and fixtures for configs and checkout requests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::client::{BalanceProvider, CheckoutRequest, GatewayEvents, PaymentGateway};
use crate::domain::{
    BalanceError, Currency, FailurePayload, GatewayError, Metadata, PaymentError, PaymentResult,
    SuccessPayload,
};
use crate::state::{WidgetCallbacks, WidgetConfig};

// ============================================================================
// Mock Gateway
// ============================================================================

/// How a [`MockGateway`] answers `open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCheckout {
    /// Reports success with the given payment id.
    Succeed(String),
    /// Reports a failure with the given code and description.
    Fail(String, String),
    /// Reports that the customer closed the overlay.
    Dismiss,
    /// Keeps the events handle; the test settles it via [`MockGateway::held`].
    Hold,
    /// `open` itself fails.
    FailOpen,
    /// `load_library` fails.
    FailLoad,
}

#[derive(Debug)]
pub struct MockGateway {
    behaviour: MockCheckout,
    loads: AtomicUsize,
    opened: Mutex<Vec<CheckoutRequest>>,
    held: Mutex<Vec<GatewayEvents>>,
}

impl MockGateway {
    #[must_use]
    pub fn new(behaviour: MockCheckout) -> Self {
        Self {
            behaviour,
            loads: AtomicUsize::new(0),
            opened: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Requests passed to `open`, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<CheckoutRequest> {
        self.opened.lock().unwrap().clone()
    }

    /// Event handles kept by [`MockCheckout::Hold`], in order.
    #[must_use]
    pub fn held(&self) -> Vec<GatewayEvents> {
        self.held.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn load_library(&self) -> Result<(), GatewayError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.behaviour == MockCheckout::FailLoad {
            return Err(GatewayError::library_load("script blocked"));
        }
        Ok(())
    }

    fn open(&self, request: CheckoutRequest, events: GatewayEvents) -> Result<(), GatewayError> {
        if self.behaviour == MockCheckout::FailOpen {
            return Err(GatewayError::initialization("invalid key"));
        }
        self.opened.lock().unwrap().push(request);
        match &self.behaviour {
            MockCheckout::Succeed(id) => events.succeeded(PaymentResult::new(id.clone())),
            MockCheckout::Fail(code, description) => {
                events.failed(PaymentError::new(code.clone(), description.clone()));
            }
            MockCheckout::Dismiss => events.dismissed(),
            MockCheckout::Hold => self.held.lock().unwrap().push(events),
            MockCheckout::FailOpen | MockCheckout::FailLoad => {}
        }
        Ok(())
    }
}

// ============================================================================
// Mock Balance Provider
// ============================================================================

/// Answers from a queue of scripted responses, then repeats the fallback.
#[derive(Debug)]
pub struct MockBalanceProvider {
    scripted: Mutex<VecDeque<Result<Decimal, BalanceError>>>,
    fallback: Result<Decimal, BalanceError>,
    urls: Mutex<Vec<String>>,
}

impl MockBalanceProvider {
    #[must_use]
    pub fn returning(result: Result<Decimal, BalanceError>) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            fallback: result,
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Answers with `results` in order, then with the last one forever.
    #[must_use]
    pub fn sequence(results: Vec<Result<Decimal, BalanceError>>) -> Self {
        let fallback = results
            .last()
            .cloned()
            .unwrap_or(Err(BalanceError::NotConfigured));
        Self {
            scripted: Mutex::new(results.into()),
            fallback,
            urls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BalanceProvider for MockBalanceProvider {
    async fn fetch_balance(&self, url: &str) -> Result<Decimal, BalanceError> {
        self.urls.lock().unwrap().push(url.to_string());
        let scripted = self.scripted.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

// ============================================================================
// Callback Recorder
// ============================================================================

/// One host callback invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Success(SuccessPayload),
    Failure(FailurePayload),
    Close,
    BalanceLoaded(Decimal),
    BalanceError(BalanceError),
}

/// Records every callback invocation in order.
#[derive(Debug, Clone, Default)]
pub struct CallbackRecorder {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl CallbackRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A full callback set that records into this recorder.
    #[must_use]
    pub fn callbacks(&self) -> WidgetCallbacks {
        let success = Arc::clone(&self.events);
        let failure = Arc::clone(&self.events);
        let close = Arc::clone(&self.events);
        let loaded = Arc::clone(&self.events);
        let errored = Arc::clone(&self.events);
        WidgetCallbacks::new()
            .on_success(move |p| success.lock().unwrap().push(Recorded::Success(p.clone())))
            .on_failure(move |p| failure.lock().unwrap().push(Recorded::Failure(p.clone())))
            .on_close(move || close.lock().unwrap().push(Recorded::Close))
            .on_balance_loaded(move |a| loaded.lock().unwrap().push(Recorded::BalanceLoaded(a)))
            .on_balance_error(move |e| {
                errored
                    .lock()
                    .unwrap()
                    .push(Recorded::BalanceError(e.clone()));
            })
    }

    #[must_use]
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    #[must_use]
    pub fn count(&self, matches: impl Fn(&Recorded) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matches(e)).count()
    }
}

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct CheckoutRequestMother;

impl CheckoutRequestMother {
    #[must_use]
    pub fn rupees(amount: u64) -> CheckoutRequest {
        CheckoutRequest {
            credential: "rzp_test_key".to_string(),
            amount_minor_units: amount * 100,
            currency: "INR".to_string(),
            name: "Wallet Recharge".to_string(),
            description: format!("Add ₹{amount} to wallet"),
            notes: Metadata::new(),
            prefill: Metadata::new(),
            theme_color: "#8b5cf6".to_string(),
        }
    }
}

pub struct ConfigMother;

impl ConfigMother {
    /// INR, presets [100, 500], bounds 10..=1000, credential set, no balance source.
    #[must_use]
    pub fn basic() -> WidgetConfig {
        WidgetConfig {
            api_key: Some("rzp_test_key".to_string()),
            currency: Currency::new("INR"),
            amounts: vec![Decimal::from(100), Decimal::from(500)],
            min_amount: Decimal::from(10),
            max_amount: Decimal::from(1000),
            ..WidgetConfig::default()
        }
    }

    #[must_use]
    pub fn with_balance_url() -> WidgetConfig {
        WidgetConfig {
            balance_api_url: Some("http://wallet.test/balance".to_string()),
            ..Self::basic()
        }
    }

    #[must_use]
    pub fn without_credential() -> WidgetConfig {
        WidgetConfig {
            api_key: None,
            ..Self::basic()
        }
    }
}
