//! Widget configuration with persistence.
//!
//! This module provides the [`WidgetConfig`] structure holding everything the
//! host supplies when embedding the widget: currency, preset amounts, bounds,
//! gateway credential, balance source, pass-through custom data, and text and
//! theme overrides.
//!
//! Keys are camelCase so a config written for the browser embed loads as-is;
//! unknown keys are ignored and missing keys take their defaults.
//!
//! # Configuration File Location
//!
//! The demo binary reads its configuration from:
//! - Linux: `~/.config/wallet-recharge/config.json`
//! - macOS: `~/Library/Application Support/wallet-recharge/config.json`
//! - Windows: `%APPDATA%/wallet-recharge/config.json`
//!
//! # Example
//!
//! ```ignore
//! use wallet_recharge::state::WidgetConfig;
//!
//! let mut config = WidgetConfig::load();
//! config.api_key = Some("rzp_test_123".to_string());
//! config.save()?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::APP_NAME;
use crate::domain::{Currency, Metadata};
use crate::theme::Palette;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// WidgetConfig
// ============================================================================

/// Construction-time configuration of one widget instance.
///
/// Preset amounts are not checked against the bounds; validation happens per
/// attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Gateway credential. Payments are refused while this is missing.
    pub api_key: Option<String>,
    pub currency: Currency,
    /// Preset amounts, in display order.
    pub amounts: Vec<Decimal>,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    /// Endpoint returning the wallet balance as JSON.
    #[serde(rename = "balanceAPIUrl", alias = "balanceApiUrl")]
    pub balance_api_url: Option<String>,
    /// Seed balance shown before (or instead of) a fetch.
    pub balance: Option<Decimal>,
    /// Host metadata forwarded with every attempt.
    pub custom_data: Metadata,
    pub theme: ThemeConfig,
    pub text: TextConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            currency: Currency::default(),
            amounts: [100, 500, 1000, 2000, 5000]
                .into_iter()
                .map(Decimal::from)
                .collect(),
            min_amount: Decimal::from(10),
            max_amount: Decimal::from(50_000),
            balance_api_url: None,
            balance: None,
            custom_data: Metadata::new(),
            theme: ThemeConfig::default(),
            text: TextConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Returns the credential if one is set and non-blank.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Returns the balance endpoint if one is set and non-blank.
    #[must_use]
    pub fn balance_source(&self) -> Option<&str> {
        self.balance_api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Returns the path to the default configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from the default location.
    ///
    /// If the file doesn't exist or cannot be parsed, returns the defaults.
    #[must_use]
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::try_load_from(&path)) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Config load failed, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Attempts to load the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The JSON content cannot be parsed
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration path cannot be determined
    /// - The configuration cannot be serialized
    /// - The file cannot be written
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Saves the configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Accent colours as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub primary_color: String,
    pub success_color: String,
    pub error_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary_color: "#8b5cf6".to_string(),
            success_color: "#059669".to_string(),
            error_color: "#dc2626".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Resolves the terminal palette for this theme.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::from_hex(&self.primary_color, &self.success_color, &self.error_color)
    }
}

// ============================================================================
// Text
// ============================================================================

/// User-facing strings. Any subset may be overridden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConfig {
    pub title: String,
    pub subtitle: String,
    pub balance_title: String,
    pub custom_amount_label: String,
    pub recharge_button: String,
    pub processing_text: String,
    pub success_message: String,
    pub error_message: String,
    pub balance_loading_text: String,
    pub balance_error_text: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            title: "Wallet Recharge".to_string(),
            subtitle: "Choose your preferred amount to add".to_string(),
            balance_title: "Available Balance".to_string(),
            custom_amount_label: "Custom Amount".to_string(),
            recharge_button: "Pay Now".to_string(),
            processing_text: "Processing payment...".to_string(),
            success_message: "Payment completed successfully!".to_string(),
            error_message: "Payment failed. Please try again.".to_string(),
            balance_loading_text: "Loading balance...".to_string(),
            balance_error_text: "Failed to load balance".to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
