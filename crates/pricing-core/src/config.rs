//! # Pricing Configuration
//!
//! The settings every item constructor needs: the working currency and the
//! tax list applied when an item names none.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Builder overrides (highest priority)                               │
//! │     PricingConfig::default().with_currency(..)                         │
//! │                                                                         │
//! │  2. TOML document                                                      │
//! │     PricingConfig::from_toml_str / PricingConfig::load                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     INR, GST 18%                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! currency = "USD"
//!
//! [[default_tax]]
//! identifier = "STATE"
//! rate = "6.25%"
//!
//! [[default_tax]]
//! identifier = "CITY"
//! rate = "2%"
//! ```
//!
//! There is no process-wide default: the config is passed explicitly to the
//! constructors that need it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Currency;
use crate::tax::TaxDefinitionList;

/// Currency and default tax list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency for bare-number price literals.
    #[serde(default = "default_currency")]
    pub currency: Currency,

    /// Taxes for items that specify none, and for add-ons told to use the default.
    #[serde(default = "TaxDefinitionList::standard_gst")]
    pub default_tax: TaxDefinitionList,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            currency: default_currency(),
            default_tax: TaxDefinitionList::standard_gst(),
        }
    }
}

impl PricingConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let config: PricingConfig = toml::from_str(contents).map_err(|e| CoreError::Config {
            reason: e.to_string(),
        })?;
        debug!(
            currency = %config.currency,
            taxes = config.default_tax.len(),
            "Loaded pricing config"
        );
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        debug!(?path, "Loading pricing config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| CoreError::Config {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Renders the config back to TOML.
    pub fn to_toml_string(&self) -> CoreResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::Config {
            reason: e.to_string(),
        })
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_default_tax(mut self, default_tax: TaxDefinitionList) -> Self {
        self.default_tax = default_tax;
        self
    }
}

fn default_currency() -> Currency {
    Currency::from(crate::DEFAULT_CURRENCY)
}

// =============================================================================
// Unit Tests
// =============================================================================
