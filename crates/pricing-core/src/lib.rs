//! # pricing-core: Line-Item Pricing Engine
//!
//! Prices line items (discounts, taxes, add-ons, quantity/unit extension)
//! and rolls them up into collectors with per-identifier breakdowns.
//! Everything is pure computation: no I/O apart from optionally reading a
//! config file, and no global state.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         pricing-core                                    │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │  Values        money (Money, Currency)   types (Percentage,       │ │
//! │  │                DateSpan, Measure)        breakdown                │ │
//! │  └─────────────────────────────┬─────────────────────────────────────┘ │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼─────────────────────────────────────┐ │
//! │  │  Capabilities  discount (DiscountLedger)  tax (TaxDefinitionList)  │ │
//! │  │                addon (AddonCatalog, AddonSet, ResolvedAddon)      │ │
//! │  └─────────────────────────────┬─────────────────────────────────────┘ │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼─────────────────────────────────────┐ │
//! │  │  Priceables    pricing (Priceable, PricingItem)                   │ │
//! │  │                collector (PriceCollector) ◄── nests recursively   │ │
//! │  └─────────────────────────────┬─────────────────────────────────────┘ │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼─────────────────────────────────────┐ │
//! │  │  Output        summary (PriceSummary, serde + TypeScript)         │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! │                                                                         │
//! │  config (PricingConfig)   error (CoreError)   validation               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Currency-tagged decimal amounts
//! - [`types`] - Percentages, date spans and quantities
//! - [`breakdown`] - Ordered `(identifier, amount)` lines
//! - [`discount`] - Discount ledger
//! - [`tax`] - Tax definitions, lists and add-on tax overrides
//! - [`addon`] - Add-on catalogs, inclusions and resolution
//! - [`pricing`] - The `Priceable` trait and concrete items
//! - [`collector`] - Aggregation of priceables
//! - [`summary`] - Serializable snapshots
//! - [`config`] - Currency and default tax
//! - [`error`] - Error types
//! - [`validation`] - Input checks
//!
//! ## Design Principles
//!
//! 1. **Computed on read**: prices are derived on every call, never cached
//! 2. **Decimal money**: `rust_decimal`, never floats; currencies never mix silently
//! 3. **Explicit errors**: unsupported operations fail, they never default to zero
//! 4. **Explicit config**: the default tax list is passed in, not global
//!
//! ## Example Usage
//!
//! ```rust
//! use pricing_core::{Money, PriceCollector, Priceable, PricingConfig, PricingItem};
//! use rust_decimal_macros::dec;
//! use std::rc::Rc;
//!
//! let config = PricingConfig::default(); // INR, GST 18%
//!
//! let mut tea = PricingItem::simple_row("Tea", Money::new(dec!(100), "INR"), &config)
//!     .with_quantity(2);
//! tea.apply_discount("promo", Money::new(dec!(10), "INR"));
//!
//! let mut order = PriceCollector::new("INR");
//! order.append(Rc::new(tea));
//!
//! assert_eq!(order.extended_price().unwrap().amount(), dec!(180));
//! assert_eq!(order.total_price().unwrap().amount(), dec!(212.4));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod addon;
pub mod breakdown;
pub mod collector;
pub mod config;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod summary;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pricing_core::Money` instead of
// `use pricing_core::money::Money`

pub use addon::{AddonCatalog, AddonDefinition, AddonPrice, ResolvedAddon};
pub use breakdown::Breakdown;
pub use collector::PriceCollector;
pub use config::PricingConfig;
pub use error::{CoreError, CoreResult, ParseError, ValidationError};
pub use money::{Currency, Money};
pub use pricing::{ItemKind, Priceable, PricingBase, PricingItem, PricingItemSpec};
pub use summary::{AmountLine, PriceSummary};
pub use tax::{TaxDefinition, TaxDefinitionList, TaxOverride};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when no configuration is given.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Identifier of the stock default tax.
pub const DEFAULT_TAX_IDENTIFIER: &str = "GST";

/// Rate of the stock default tax, in percent.
pub const DEFAULT_TAX_PERCENT: u32 = 18;

/// Maximum length of tax and discount identifiers.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Maximum length of item and add-on descriptions.
///
/// Descriptions end up on receipts and invoices.
pub const MAX_DESCRIPTION_LEN: usize = 200;
