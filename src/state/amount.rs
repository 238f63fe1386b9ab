//! Amount selection and validation.
//!
//! The customer either picks a preset or types a custom amount; the two are
//! mutually exclusive. Typing a value that equals a preset collapses back to
//! that preset so the preset is highlighted again, while the typed text itself
//! is kept as entered.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{Currency, ValidationError};

/// What the customer has chosen so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AmountSelection {
    #[default]
    None,
    Preset(Decimal),
    /// Raw text of the custom input, kept verbatim.
    Custom(String),
}

/// Resolves and validates the amount to charge.
#[derive(Debug, Clone)]
pub struct AmountSelector {
    presets: Vec<Decimal>,
    currency: Currency,
    selection: AmountSelection,
    /// Contents of the custom input, verbatim.
    input: String,
    error: Option<String>,
}

impl AmountSelector {
    #[must_use]
    pub fn new(presets: Vec<Decimal>, currency: Currency) -> Self {
        Self {
            presets,
            currency,
            selection: AmountSelection::None,
            input: String::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn presets(&self) -> &[Decimal] {
        &self.presets
    }

    #[must_use]
    pub fn selection(&self) -> &AmountSelection {
        &self.selection
    }

    /// The inline error currently displayed under the input, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Text shown in the custom input. A selected preset is mirrored there.
    #[must_use]
    pub fn input_text(&self) -> String {
        self.input.clone()
    }

    #[must_use]
    pub fn is_selected(&self, preset: Decimal) -> bool {
        self.selection == AmountSelection::Preset(preset)
    }

    pub fn select_preset(&mut self, amount: Decimal) {
        self.selection = AmountSelection::Preset(amount);
        self.input = amount.normalize().to_string();
        self.error = None;
    }

    /// Replaces the custom input text. Only the selection collapses onto a
    /// matching preset; the text is stored as typed.
    pub fn set_custom_text(&mut self, raw: &str) {
        self.error = None;
        self.input = raw.to_string();
        if raw.trim().is_empty() {
            self.selection = AmountSelection::None;
            return;
        }
        self.selection = match parse_amount(raw).and_then(|value| self.matching_preset(value)) {
            Some(preset) => AmountSelection::Preset(preset),
            None => AmountSelection::Custom(raw.to_string()),
        };
    }

    fn matching_preset(&self, value: Decimal) -> Option<Decimal> {
        self.presets.iter().copied().find(|preset| *preset == value)
    }

    /// The amount the current selection resolves to, if it is numeric.
    #[must_use]
    pub fn resolved_amount(&self) -> Option<Decimal> {
        match &self.selection {
            AmountSelection::None => None,
            AmountSelection::Preset(amount) => Some(*amount),
            AmountSelection::Custom(raw) => parse_amount(raw),
        }
    }

    /// Checks the resolved amount against `min..=max`.
    ///
    /// # Errors
    ///
    /// The returned amount is rounded to whole minor units, so it is exactly
    /// what gets charged.
    ///
    /// - `NoAmount` if nothing numeric is selected or the amount is not positive
    /// - `BelowMinimum` / `AboveMaximum` if the amount is out of bounds
    pub fn validate(&self, min: Decimal, max: Decimal) -> Result<Decimal, ValidationError> {
        let amount = self
            .resolved_amount()
            .map(Currency::round_to_minor)
            .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
            .ok_or(ValidationError::NoAmount)?;

        if amount < min {
            return Err(ValidationError::BelowMinimum {
                symbol: self.currency.symbol().to_string(),
                min: min.normalize(),
            });
        }
        if amount > max {
            return Err(ValidationError::AboveMaximum {
                symbol: self.currency.symbol().to_string(),
                max: max.normalize(),
            });
        }
        Ok(amount)
    }

    /// Displays an inline error until the next edit.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn reset(&mut self) {
        self.selection = AmountSelection::None;
        self.input.clear();
        self.error = None;
    }
}

/// Accepts a trailing decimal point (`"500."`) while the fraction is typed.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix('.').unwrap_or(trimmed);
    Decimal::from_str(digits).ok()
}

// ============================================================================
// Tests
// ============================================================================
