//! # Add-on Model
//!
//! Catalog definitions for add-on charges, the inclusions an item records,
//! and the resolved add-on lines produced when the item is read.
//!
//! ## Lifecycle of an Add-on
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  AddonCatalog["gift-wrap"] = { price: 5%, unit: 1 }                    │
//! │         │                                                               │
//! │         ▼  item.include_addon("gift-wrap", 1, None, Inherit)           │
//! │  AddonInclusion { price: 5%, tax: Inherit, qty: 1, unit: 1 }           │
//! │         │   stored as-is: the percentage is NOT converted yet          │
//! │         │                                                               │
//! │         │  item.apply_discount("promo", 20)   ◄── parent changes        │
//! │         ▼                                                               │
//! │  item.included_addons()                                                │
//! │         │   5% × parent's effective price AT THIS READ                 │
//! │         ▼                                                               │
//! │  ResolvedAddon { price: 4 INR, tax: parent's list, qty: 1, unit: 1 }   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution happens on every read and nothing is cached, so the add-on
//! always follows the parent's current state.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::breakdown::Breakdown;
use crate::error::{CoreError, CoreResult, ParseError};
use crate::money::{Currency, Money};
use crate::pricing::Priceable;
use crate::tax::{TaxDefinitionList, TaxOverride};
use crate::types::{Measure, Percentage, UnitLiteral, UnitType};
use crate::validation::{validate_description, validate_quantity};

// =============================================================================
// Add-on Price
// =============================================================================

/// An add-on's price: a share of the parent's effective price, or a flat amount.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum AddonPrice {
    Percentage(Percentage),
    Absolute(Money),
}

impl AddonPrice {
    /// Tries the literal as a percentage first, then as money.
    ///
    /// When both fail, the money parse error is returned unchanged: a
    /// literal without a `%` is taken to have been meant as money.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::addon::AddonPrice;
    /// use pricing_core::money::Currency;
    ///
    /// let inr = Currency::from("INR");
    /// assert!(matches!(AddonPrice::parse("5%", &inr).unwrap(), AddonPrice::Percentage(_)));
    /// assert!(matches!(AddonPrice::parse("250", &inr).unwrap(), AddonPrice::Absolute(_)));
    /// assert!(AddonPrice::parse("free", &inr).is_err());
    /// ```
    pub fn parse(raw: &str, currency: &Currency) -> Result<Self, ParseError> {
        match raw.parse::<Percentage>() {
            Ok(rate) => Ok(AddonPrice::Percentage(rate)),
            Err(_) => Money::parse_or(raw, currency).map(AddonPrice::Absolute),
        }
    }

    /// The concrete price against the parent's current effective price.
    pub fn resolve(&self, parent_effective: &Money) -> CoreResult<Money> {
        match self {
            AddonPrice::Percentage(rate) => rate.of(parent_effective),
            AddonPrice::Absolute(amount) => Ok(amount.clone()),
        }
    }
}

impl fmt::Display for AddonPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddonPrice::Percentage(rate) => write!(f, "{rate}"),
            AddonPrice::Absolute(amount) => write!(f, "{amount}"),
        }
    }
}

/// Percentage, or currency-tagged money. Catalog entries have no parent
/// currency to fall back on, so a bare number is rejected here.
impl FromStr for AddonPrice {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Percentage>() {
            Ok(rate) => Ok(AddonPrice::Percentage(rate)),
            Err(_) => s.parse::<Money>().map(AddonPrice::Absolute),
        }
    }
}

impl TryFrom<String> for AddonPrice {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Percentage> for AddonPrice {
    fn from(rate: Percentage) -> Self {
        AddonPrice::Percentage(rate)
    }
}

impl From<Money> for AddonPrice {
    fn from(amount: Money) -> Self {
        AddonPrice::Absolute(amount)
    }
}

// =============================================================================
// Add-on Definition / Catalog
// =============================================================================

/// A catalog entry describing a chargeable add-on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AddonDefinitionSpec")]
pub struct AddonDefinition {
    description: String,
    price: AddonPrice,
    tax: Option<TaxDefinitionList>,
    unit: Measure,
    unit_type: UnitType,
}

impl AddonDefinition {
    /// A definition with a numeric unit of 1 and no tax list of its own.
    pub fn new(description: impl Into<String>, price: impl Into<AddonPrice>) -> Self {
        AddonDefinition {
            description: description.into(),
            price: price.into(),
            tax: None,
            unit: Measure::one(),
            unit_type: UnitType::Int,
        }
    }

    pub fn with_tax(mut self, tax: TaxDefinitionList) -> Self {
        self.tax = Some(tax);
        self
    }

    /// Sets the unit; a span unit switches the unit type to `DateSpan`.
    pub fn with_unit(mut self, unit: Measure) -> Self {
        self.unit_type = match unit {
            Measure::Count(_) => UnitType::Int,
            Measure::Span(_) => UnitType::DateSpan,
        };
        self.unit = unit;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> &AddonPrice {
        &self.price
    }

    pub fn tax(&self) -> Option<&TaxDefinitionList> {
        self.tax.as_ref()
    }

    pub fn unit(&self) -> &Measure {
        &self.unit
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }
}

/// An add-on definition as written in configuration.
///
/// ```toml
/// [addons.support]
/// desc = "Annual support"
/// price = "12%"
/// unit = "1 year"
/// unit_type = "DateSpan"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AddonDefinitionSpec {
    #[serde(alias = "desc")]
    pub description: String,
    pub price: AddonPrice,
    #[serde(default)]
    pub tax: Option<TaxDefinitionList>,
    #[serde(default)]
    pub unit: Option<UnitLiteral>,
    #[serde(default)]
    pub unit_type: UnitType,
}

impl TryFrom<AddonDefinitionSpec> for AddonDefinition {
    type Error = CoreError;

    fn try_from(spec: AddonDefinitionSpec) -> Result<Self, Self::Error> {
        validate_description(&spec.description)?;
        let unit = match &spec.unit {
            Some(literal) => spec.unit_type.measure(literal)?,
            None => Measure::one(),
        };
        Ok(AddonDefinition {
            description: spec.description,
            price: spec.price,
            tax: spec.tax,
            unit,
            unit_type: spec.unit_type,
        })
    }
}

/// Add-on definitions keyed by the name items include them under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AddonCatalog {
    definitions: BTreeMap<String, AddonDefinition>,
}

impl AddonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, definition: AddonDefinition) {
        self.definitions.insert(key.into(), definition);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, definition: AddonDefinition) -> Self {
        self.insert(key, definition);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AddonDefinition> {
        self.definitions.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

// =============================================================================
// Add-on Inclusion / Set
// =============================================================================

/// An add-on attached to an item, with its price still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonInclusion {
    pub key: String,
    pub description: String,
    pub quantity: Measure,
    pub price: AddonPrice,
    pub tax: TaxOverride,
    pub unit: Measure,
}

/// The add-on capability of an item: a shared catalog plus the inclusions.
#[derive(Debug, Clone, Default)]
pub struct AddonSet {
    catalog: Rc<AddonCatalog>,
    inclusions: Vec<AddonInclusion>,
}

impl AddonSet {
    pub fn new(catalog: Rc<AddonCatalog>) -> Self {
        AddonSet {
            catalog,
            inclusions: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &AddonCatalog {
        &self.catalog
    }

    /// Records an add-on for `key`.
    ///
    /// ## Resolution
    /// - `price`: parsed as a percentage, then as money in `currency`;
    ///   `None` (or blank) takes the catalog price
    /// - `key` missing from the catalog: the key becomes the description and
    ///   the unit is 1; a price must then be given
    /// - `tax`: kept as an override and resolved on every read
    ///
    /// A price literal that is neither a percentage nor money fails with the
    /// `ParseError` from the money parser, and nothing is recorded.
    pub fn include(
        &mut self,
        key: &str,
        quantity: Measure,
        price: Option<&str>,
        tax: TaxOverride,
        currency: &Currency,
    ) -> CoreResult<()> {
        let price = match price.filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => Some(AddonPrice::parse(raw, currency)?),
            None => None,
        };
        self.include_priced(key, quantity, price, tax)
    }

    /// [`include`](Self::include) with an already-typed price.
    pub fn include_priced(
        &mut self,
        key: &str,
        quantity: Measure,
        price: Option<AddonPrice>,
        tax: TaxOverride,
    ) -> CoreResult<()> {
        validate_quantity(&quantity)?;
        let definition = self.catalog.get(key);

        let price = match (price, definition) {
            (Some(price), _) => price,
            (None, Some(definition)) => definition.price.clone(),
            (None, None) => {
                return Err(CoreError::UnknownAddon {
                    key: key.to_string(),
                })
            }
        };
        let (description, unit) = match definition {
            Some(definition) => (definition.description.clone(), definition.unit.clone()),
            None => (key.to_string(), Measure::one()),
        };
        let tax = tax.against_catalog(definition.and_then(|d| d.tax.as_ref()));

        debug!(
            addon = %key,
            quantity = %quantity,
            price = %price,
            cataloged = definition.is_some(),
            "Including add-on"
        );

        self.inclusions.push(AddonInclusion {
            key: key.to_string(),
            description,
            quantity,
            price,
            tax,
            unit,
        });
        Ok(())
    }

    /// Resolves every inclusion against the parent's current state, in
    /// inclusion order.
    pub fn resolve(
        &self,
        parent_effective: &Money,
        parent_tax: &TaxDefinitionList,
        default_tax: &TaxDefinitionList,
    ) -> CoreResult<Vec<ResolvedAddon>> {
        trace!(
            count = self.inclusions.len(),
            parent_effective = %parent_effective,
            "Resolving add-ons"
        );
        self.inclusions
            .iter()
            .map(|inclusion| {
                Ok(ResolvedAddon {
                    description: inclusion.description.clone(),
                    quantity: inclusion.quantity.clone(),
                    price: inclusion.price.resolve(parent_effective)?,
                    tax: inclusion.tax.resolve(parent_tax, default_tax),
                    unit: inclusion.unit.clone(),
                })
            })
            .collect()
    }

    /// Drops every inclusion.
    pub fn reset(&mut self) {
        debug!(count = self.inclusions.len(), "Resetting add-ons");
        self.inclusions.clear();
    }

    pub fn inclusions(&self) -> &[AddonInclusion] {
        &self.inclusions
    }

    pub fn len(&self) -> usize {
        self.inclusions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inclusions.is_empty()
    }
}

// =============================================================================
// Resolved Add-on
// =============================================================================

/// A fully priced add-on line. Built fresh on every read of the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddon {
    pub description: String,
    pub quantity: Measure,
    pub price: Money,
    pub tax: TaxDefinitionList,
    pub unit: Measure,
}

impl Priceable for ResolvedAddon {
    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn quantity(&self) -> Measure {
        self.quantity.clone()
    }

    fn unit(&self) -> Measure {
        self.unit.clone()
    }

    fn base_price(&self) -> CoreResult<Money> {
        Ok(self.price.clone())
    }

    fn taxes(&self) -> CoreResult<Breakdown> {
        self.tax.breakdown(&self.extended_price()?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
