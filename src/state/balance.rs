//! Balance lifecycle.
//!
//! The tracker flips to `Loading` synchronously and spawns the request; the
//! result comes back as a [`WidgetMessage::BalanceFetched`] and is applied by
//! [`BalanceTracker::complete`]. Overlapping fetches are neither sequenced
//! nor cancelled, so the last response to arrive wins.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::mpsc;

use super::{WidgetCallbacks, WidgetMessage};
use crate::client::BalanceProvider;
use crate::domain::BalanceError;

/// Where the balance currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BalanceState {
    #[default]
    Unknown,
    Loading,
    Loaded(Decimal),
    Errored(String),
}

impl BalanceState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether a value (loaded or injected) is available.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

#[derive(Debug)]
pub struct BalanceTracker {
    state: BalanceState,
    source: Option<String>,
    provider: Arc<dyn BalanceProvider>,
    in_flight: usize,
}

impl BalanceTracker {
    /// Creates a tracker, starting at `Loaded(seed)` when a seed is given.
    #[must_use]
    pub fn new(
        source: Option<String>,
        seed: Option<Decimal>,
        provider: Arc<dyn BalanceProvider>,
    ) -> Self {
        Self {
            state: seed.map_or(BalanceState::Unknown, BalanceState::Loaded),
            source,
            provider,
            in_flight: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &BalanceState {
        &self.state
    }

    /// Number of requests sent whose response has not been applied yet.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Starts a balance retrieval.
    ///
    /// Without a source, a known balance is left untouched and an unknown one
    /// becomes `Errored` with no request and no callback.
    pub fn fetch(&mut self, tx: &mpsc::UnboundedSender<WidgetMessage>) {
        let Some(url) = self.source.clone() else {
            if !self.state.is_known() {
                tracing::debug!("No balance source configured");
                self.state = BalanceState::Errored(BalanceError::NotConfigured.to_string());
            }
            return;
        };

        self.state = BalanceState::Loading;
        self.in_flight += 1;

        let provider = Arc::clone(&self.provider);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = provider.fetch_balance(&url).await;
            // Receiver may be dropped after destroy - safe to ignore
            let _ = tx.send(WidgetMessage::BalanceFetched(result));
        });
    }

    /// Applies a finished retrieval and notifies the host.
    pub fn complete(&mut self, result: Result<Decimal, BalanceError>, callbacks: &WidgetCallbacks) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(amount) => {
                tracing::debug!(%amount, "Balance loaded");
                self.state = BalanceState::Loaded(amount);
                callbacks.balance_loaded(amount);
            }
            Err(err) => {
                tracing::warn!("Balance fetch failed: {err}");
                self.state = BalanceState::Errored(err.to_string());
                callbacks.balance_error(&err);
            }
        }
    }

    /// Injects a balance. In-flight fetches still complete and may overwrite it.
    pub fn set_balance(&mut self, amount: Decimal) {
        self.state = BalanceState::Loaded(amount);
    }
}

// ============================================================================
// Tests
// ============================================================================
