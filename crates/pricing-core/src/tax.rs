//! # Tax Model
//!
//! Tax definitions, ordered tax lists, and the add-on tax override.
//!
//! ## How Taxes Are Applied
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TaxDefinitionList [ (CGST 9%), (SGST 9%), (CESS 0%) ]                  │
//! │                                                                         │
//! │  apply(extended = 180 INR)                                             │
//! │      │                                                                  │
//! │      ├──► ("CGST", 16.2 INR)                                           │
//! │      ├──► ("SGST", 16.2 INR)                                           │
//! │      └──► CESS skipped: a zero rate never shows up in a breakdown      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A list is never empty. Items that specify no taxes take the configured
//! default list ([`PricingConfig::default_tax`](crate::config::PricingConfig)).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::breakdown::Breakdown;
use crate::error::{CoreError, CoreResult, ParseError};
use crate::money::Money;
use crate::types::Percentage;
use crate::validation::{validate_identifier, validate_rate};

// =============================================================================
// Tax Definition
// =============================================================================

/// A named tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDefinition {
    #[serde(alias = "ident")]
    identifier: String,
    rate: Percentage,
}

impl TaxDefinition {
    /// Creates a tax definition after validating the identifier and rate.
    ///
    /// A zero rate is valid; it is simply left out of tax output.
    pub fn new(identifier: impl Into<String>, rate: Percentage) -> CoreResult<Self> {
        let identifier = identifier.into();
        validate_identifier("tax identifier", &identifier)?;
        validate_rate("tax rate", rate)?;
        Ok(TaxDefinition { identifier, rate })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn rate(&self) -> Percentage {
        self.rate
    }

    /// Tax owed on `base`.
    pub fn amount_on(&self, base: &Money) -> CoreResult<Money> {
        self.rate.of(base)
    }
}

impl fmt::Display for TaxDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.identifier, self.rate)
    }
}

// =============================================================================
// Tax Definition List
// =============================================================================

/// An ordered, non-empty list of tax definitions.
///
/// Duplicate identifiers are allowed; their amounts add up wherever taxes
/// are bucketed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxDefinition>", into = "Vec<TaxDefinition>")]
pub struct TaxDefinitionList {
    definitions: Vec<TaxDefinition>,
}

impl TaxDefinitionList {
    /// Creates a list, rejecting an empty one.
    pub fn new(definitions: Vec<TaxDefinition>) -> CoreResult<Self> {
        if definitions.is_empty() {
            return Err(CoreError::EmptyTaxList);
        }
        for definition in &definitions {
            validate_identifier("tax identifier", &definition.identifier)?;
            validate_rate("tax rate", definition.rate)?;
        }
        Ok(TaxDefinitionList { definitions })
    }

    /// A list holding a single definition.
    pub fn single(definition: TaxDefinition) -> Self {
        TaxDefinitionList {
            definitions: vec![definition],
        }
    }

    /// `GST` at 18%, the stock default when nothing is configured.
    pub fn standard_gst() -> Self {
        TaxDefinitionList::single(TaxDefinition {
            identifier: crate::DEFAULT_TAX_IDENTIFIER.to_string(),
            rate: Percentage::from_percent(crate::DEFAULT_TAX_PERCENT.into()),
        })
    }

    /// Builds a list from `(identifier, rate literal)` pairs such as `("VAT", "18%")`.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::tax::TaxDefinitionList;
    ///
    /// let gst = TaxDefinitionList::parse(&[("CGST", "9%"), ("SGST", "9%")]).unwrap();
    /// assert_eq!(gst.len(), 2);
    /// ```
    pub fn parse(pairs: &[(&str, &str)]) -> CoreResult<Self> {
        let definitions = pairs
            .iter()
            .map(|(identifier, rate)| TaxDefinition::new(*identifier, rate.parse()?))
            .collect::<CoreResult<Vec<_>>>()?;
        TaxDefinitionList::new(definitions)
    }

    /// `explicit` when given, otherwise a copy of `default`.
    pub fn or_default(explicit: Option<TaxDefinitionList>, default: &TaxDefinitionList) -> Self {
        explicit.unwrap_or_else(|| default.clone())
    }

    /// Lazily yields `(identifier, rate × base)` for every non-zero rate.
    pub fn apply<'a>(
        &'a self,
        base: &'a Money,
    ) -> impl Iterator<Item = CoreResult<(&'a str, Money)>> + 'a {
        self.definitions
            .iter()
            .filter(|definition| !definition.rate.is_zero())
            .map(move |definition| {
                Ok((definition.identifier.as_str(), definition.amount_on(base)?))
            })
    }

    /// The taxes on `base`, duplicates summed under one identifier.
    pub fn breakdown(&self, base: &Money) -> CoreResult<Breakdown> {
        let mut breakdown = Breakdown::new();
        for line in self.apply(base) {
            let (identifier, amount) = line?;
            breakdown.accumulate(identifier, &amount)?;
        }
        Ok(breakdown)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Always false for a constructed list; present for container symmetry.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl TryFrom<Vec<TaxDefinition>> for TaxDefinitionList {
    type Error = CoreError;

    fn try_from(definitions: Vec<TaxDefinition>) -> Result<Self, Self::Error> {
        TaxDefinitionList::new(definitions)
    }
}

impl From<TaxDefinitionList> for Vec<TaxDefinition> {
    fn from(list: TaxDefinitionList) -> Self {
        list.definitions
    }
}

// =============================================================================
// Tax Override
// =============================================================================

/// Which taxes an add-on pays.
///
/// ## Configuration Forms
/// ```text
/// tax = "inherit"                        → Inherit   (same list as the parent)
/// tax = "catalog"                        → Catalog   (the catalog entry's list)
/// tax = false / "" / null                → Default   (configured default list)
/// tax = [{ identifier = "GST", ... }]    → Explicit  (this list)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "Option<TaxOverrideLiteral>")]
pub enum TaxOverride {
    #[default]
    Inherit,
    /// The catalog entry's own tax list, or the parent's when it has none.
    Catalog,
    Default,
    Explicit(TaxDefinitionList),
}

impl TaxOverride {
    /// Replaces `Catalog` with what the catalog entry actually says.
    pub fn against_catalog(self, catalog_tax: Option<&TaxDefinitionList>) -> Self {
        match (self, catalog_tax) {
            (TaxOverride::Catalog, Some(list)) => TaxOverride::Explicit(list.clone()),
            (TaxOverride::Catalog, None) => TaxOverride::Inherit,
            (other, _) => other,
        }
    }

    /// Picks the list an add-on is taxed with.
    pub fn resolve(&self, parent: &TaxDefinitionList, default: &TaxDefinitionList) -> TaxDefinitionList {
        match self {
            TaxOverride::Inherit | TaxOverride::Catalog => parent.clone(),
            TaxOverride::Default => default.clone(),
            TaxOverride::Explicit(list) => list.clone(),
        }
    }
}

impl From<TaxDefinitionList> for TaxOverride {
    fn from(list: TaxDefinitionList) -> Self {
        TaxOverride::Explicit(list)
    }
}

/// A tax override as written in configuration, before interpretation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaxOverrideLiteral {
    Flag(bool),
    Keyword(String),
    List(TaxDefinitionList),
}

impl TryFrom<Option<TaxOverrideLiteral>> for TaxOverride {
    type Error = ParseError;

    fn try_from(raw: Option<TaxOverrideLiteral>) -> Result<Self, Self::Error> {
        match raw {
            None | Some(TaxOverrideLiteral::Flag(false)) => Ok(TaxOverride::Default),
            Some(TaxOverrideLiteral::Keyword(keyword)) => match keyword.trim() {
                "inherit" => Ok(TaxOverride::Inherit),
                "catalog" => Ok(TaxOverride::Catalog),
                "" | "default" => Ok(TaxOverride::Default),
                other => Err(ParseError::InvalidTax {
                    value: other.to_string(),
                }),
            },
            Some(TaxOverrideLiteral::List(list)) => Ok(TaxOverride::Explicit(list)),
            Some(TaxOverrideLiteral::Flag(true)) => Err(ParseError::InvalidTax {
                value: "true".to_string(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
