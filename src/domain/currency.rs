//! Currency codes, display symbols, and minor-unit conversion.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

// ============================================================================
// Symbol Table
// ============================================================================

/// Known ISO codes and their display symbols.
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("INR", "₹"),
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("SGD", "S$"),
    ("AED", "د.إ"),
    ("SAR", "﷼"),
];

/// Minor units per major unit passed to the checkout provider.
const MINOR_UNITS_PER_MAJOR: u32 = 100;

/// Decimal places of one minor unit.
const MINOR_UNIT_DIGITS: u32 = 2;

// ============================================================================
// Currency
// ============================================================================

/// An ISO currency code with its display symbol.
///
/// Unknown codes are kept as-is and render as the raw code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Returns the display symbol, or the raw code when the code is unknown.
    #[must_use]
    pub fn symbol(&self) -> &str {
        CURRENCY_SYMBOLS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map_or(self.0.as_str(), |(_, symbol)| *symbol)
    }

    /// Formats an amount as `{symbol}{amount}` with trailing zeros removed.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol(), amount.normalize())
    }

    /// Converts a major-unit amount into minor units, rounding half away from zero.
    ///
    /// Returns `None` for negative amounts or values that do not fit in a `u64`.
    #[must_use]
    pub fn to_minor_units(amount: Decimal) -> Option<u64> {
        amount
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
    }

    /// Rounds a major-unit amount to whole minor units, half away from zero.
    #[must_use]
    pub fn round_to_minor(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new("INR")
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
