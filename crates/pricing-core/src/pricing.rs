//! # Pricing Items
//!
//! The `Priceable` interface and the concrete line items that implement it.
//!
//! ## The Price Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  base_price            100.00 INR    (stored / catalog price)          │
//! │      │  − Σ discounts   −10.00        promo                             │
//! │      ▼                                                                  │
//! │  effective_price        90.00 INR                                       │
//! │      │  × qty / unit    × 2 / 1                                         │
//! │      ▼                                                                  │
//! │  extended_price        180.00 INR                                       │
//! │      │  + Σ taxes       +32.40        VAT 18% of extended               │
//! │      ▼                                                                  │
//! │  total_price           212.40 INR                                       │
//! │                                                                         │
//! │  Every stage is recomputed on each read. Nothing is cached, so a       │
//! │  discount applied after the first read shows up on the next one.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Capabilities
//! A [`PricingItem`] composes the capabilities it needs instead of
//! inheriting them:
//!
//! | Capability | Type | Simple row | Structured unit price |
//! |---|---|---|---|
//! | Discounts | [`DiscountLedger`] | yes | yes |
//! | Taxes | [`TaxDefinitionList`] | yes | yes |
//! | Add-ons | [`AddonSet`] | no | yes |

use serde::Deserialize;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

use crate::addon::{AddonCatalog, AddonPrice, AddonSet, ResolvedAddon};
use crate::breakdown::Breakdown;
use crate::config::PricingConfig;
use crate::discount::DiscountLedger;
use crate::error::{CoreError, CoreResult};
use crate::money::{Currency, Money};
use crate::tax::{TaxDefinitionList, TaxOverride};
use crate::types::{Measure, Percentage, UnitLiteral, UnitType};
use crate::validation::{validate_description, validate_identifier, validate_quantity};

// =============================================================================
// Priceable
// =============================================================================

/// Anything that can be priced: items, resolved add-ons, and collectors.
///
/// Implementors provide `quantity`, `unit` and `base_price`; the defaults
/// derive the rest of the pipeline from them. A collector overrides the
/// price methods with aggregates, which is what lets collectors nest.
pub trait Priceable: fmt::Debug {
    /// Label used to group add-ons and to render breakdowns.
    fn description(&self) -> Option<&str> {
        None
    }

    fn quantity(&self) -> Measure;

    fn unit(&self) -> Measure;

    fn base_price(&self) -> CoreResult<Money>;

    /// Base price less discounts.
    fn effective_price(&self) -> CoreResult<Money> {
        self.base_price()
    }

    /// Effective price × (quantity / unit).
    fn extended_price(&self) -> CoreResult<Money> {
        let ratio = self.quantity().ratio(&self.unit())?;
        self.effective_price()?.try_scale(ratio)
    }

    /// Extended price plus every tax line.
    fn total_price(&self) -> CoreResult<Money> {
        let extended = self.extended_price()?;
        self.taxes()?
            .into_iter()
            .try_fold(extended, |total, (_, amount)| total.try_add(&amount))
    }

    /// Tax lines; zero rates never appear.
    fn taxes(&self) -> CoreResult<Breakdown> {
        Ok(Breakdown::new())
    }

    /// Discount lines.
    fn discounts(&self) -> CoreResult<Breakdown> {
        Ok(Breakdown::new())
    }

    /// Add-ons attached to this priceable, resolved at the time of the call.
    fn included_addons(&self) -> CoreResult<Vec<Rc<dyn Priceable>>> {
        Ok(Vec::new())
    }
}

// =============================================================================
// Pricing Base
// =============================================================================

/// Quantity and unit, shared by every concrete item.
///
/// On its own it has no price: reading `base_price` from a bare base is an
/// integration error and fails with [`CoreError::Unimplemented`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingBase {
    quantity: Measure,
    unit: Measure,
}

impl PricingBase {
    pub fn new(quantity: Measure, unit: Measure) -> Self {
        PricingBase { quantity, unit }
    }

    pub fn set_quantity(&mut self, quantity: Measure) {
        self.quantity = quantity;
    }

    pub fn set_unit(&mut self, unit: Measure) {
        self.unit = unit;
    }

    /// Sets the quantity back to exactly one unit.
    pub fn reset_qty(&mut self) {
        self.quantity = self.unit.clone();
    }
}

impl Default for PricingBase {
    fn default() -> Self {
        PricingBase::new(Measure::one(), Measure::one())
    }
}

impl Priceable for PricingBase {
    fn quantity(&self) -> Measure {
        self.quantity.clone()
    }

    fn unit(&self) -> Measure {
        self.unit.clone()
    }

    fn base_price(&self) -> CoreResult<Money> {
        Err(CoreError::Unimplemented {
            operation: "base_price",
            type_name: "PricingBase",
        })
    }
}

// =============================================================================
// Pricing Item
// =============================================================================

/// Which concrete row an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A row with a flat stored price; discounts and taxes, no add-ons.
    SimpleRow,
    /// A catalog unit price with discounts, taxes and add-ons.
    StructuredUnit,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::SimpleRow => f.write_str("SimplePricingRow"),
            ItemKind::StructuredUnit => f.write_str("StructuredUnitPrice"),
        }
    }
}

/// A single priced line.
///
/// ## Example
/// ```rust
/// use pricing_core::{Money, PricingConfig, PricingItem, Priceable};
/// use pricing_core::tax::TaxDefinitionList;
/// use rust_decimal_macros::dec;
///
/// let config = PricingConfig::default();
/// let mut item = PricingItem::simple_row("Widget", Money::new(dec!(100), "INR"), &config)
///     .with_quantity(2)
///     .with_tax(TaxDefinitionList::parse(&[("VAT", "18%")]).unwrap());
/// item.apply_discount("promo", Money::new(dec!(10), "INR"));
///
/// assert_eq!(item.effective_price().unwrap().amount(), dec!(90));
/// assert_eq!(item.extended_price().unwrap().amount(), dec!(180));
/// assert_eq!(item.total_price().unwrap().amount(), dec!(212.4));
/// ```
#[derive(Debug, Clone)]
pub struct PricingItem {
    kind: ItemKind,
    description: String,
    base: PricingBase,
    price: Money,
    discounts: DiscountLedger,
    tax: TaxDefinitionList,
    default_tax: TaxDefinitionList,
    addons: Option<AddonSet>,
}

impl PricingItem {
    /// A flat-priced row without add-on support, taxed with the configured default.
    pub fn simple_row(description: impl Into<String>, price: Money, config: &PricingConfig) -> Self {
        PricingItem {
            kind: ItemKind::SimpleRow,
            description: description.into(),
            base: PricingBase::default(),
            price,
            discounts: DiscountLedger::new(),
            tax: config.default_tax.clone(),
            default_tax: config.default_tax.clone(),
            addons: None,
        }
    }

    /// A catalog unit price that accepts add-ons from `catalog`.
    pub fn structured(
        description: impl Into<String>,
        unit_price: Money,
        catalog: Rc<AddonCatalog>,
        config: &PricingConfig,
    ) -> Self {
        PricingItem {
            kind: ItemKind::StructuredUnit,
            addons: Some(AddonSet::new(catalog)),
            ..PricingItem::simple_row(description, unit_price, config)
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<Measure>) -> Self {
        self.base.set_quantity(quantity.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<Measure>) -> Self {
        self.base.set_unit(unit.into());
        self
    }

    pub fn with_tax(mut self, tax: TaxDefinitionList) -> Self {
        self.tax = tax;
        self
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn currency(&self) -> &Currency {
        self.price.currency()
    }

    pub fn tax(&self) -> &TaxDefinitionList {
        &self.tax
    }

    pub fn addons(&self) -> Option<&AddonSet> {
        self.addons.as_ref()
    }

    pub fn set_quantity(&mut self, quantity: impl Into<Measure>) {
        self.base.set_quantity(quantity.into());
    }

    /// Sets the quantity back to one unit.
    pub fn reset_qty(&mut self) {
        self.base.reset_qty();
    }

    // -------------------------------------------------------------------------
    // Discounts
    // -------------------------------------------------------------------------

    /// Records a discount already expressed as money.
    pub fn apply_discount(&mut self, identifier: impl Into<String>, amount: Money) {
        let identifier = identifier.into();
        debug!(item = %self.description, discount = %identifier, amount = %amount, "Applying discount");
        self.discounts.apply(identifier, amount);
    }

    /// Converts `rate` against the current effective price and records it.
    ///
    /// The amount is fixed at application time; later discounts do not
    /// change it. Returns the recorded amount.
    pub fn apply_percentage_discount(
        &mut self,
        identifier: impl Into<String>,
        rate: Percentage,
    ) -> CoreResult<Money> {
        let amount = rate.of(&self.effective_price()?)?;
        self.apply_discount(identifier, amount.clone());
        Ok(amount)
    }

    pub fn reset_discounts(&mut self) {
        debug!(item = %self.description, count = self.discounts.len(), "Resetting discounts");
        self.discounts.clear();
    }

    // -------------------------------------------------------------------------
    // Add-ons
    // -------------------------------------------------------------------------

    /// Includes an add-on from this item's catalog (or an ad-hoc one).
    ///
    /// See [`AddonSet::include`] for how `price` and `tax` are interpreted.
    /// Fails with [`CoreError::AddonsUnsupported`] on a simple row.
    pub fn include_addon(
        &mut self,
        key: &str,
        quantity: impl Into<Measure>,
        price: Option<&str>,
        tax: TaxOverride,
    ) -> CoreResult<()> {
        let currency = self.price.currency().clone();
        self.addon_set_mut()?
            .include(key, quantity.into(), price, tax, &currency)
    }

    /// [`include_addon`](Self::include_addon) with an already-typed price.
    pub fn include_priced_addon(
        &mut self,
        key: &str,
        quantity: impl Into<Measure>,
        price: AddonPrice,
        tax: TaxOverride,
    ) -> CoreResult<()> {
        self.addon_set_mut()?
            .include_priced(key, quantity.into(), Some(price), tax)
    }

    /// Drops all add-on inclusions. A no-op on a simple row.
    pub fn reset_addons(&mut self) {
        if let Some(addons) = self.addons.as_mut() {
            addons.reset();
        }
    }

    /// Typed form of [`Priceable::included_addons`].
    pub fn resolved_addons(&self) -> CoreResult<Vec<ResolvedAddon>> {
        match &self.addons {
            Some(addons) => addons.resolve(&self.effective_price()?, &self.tax, &self.default_tax),
            None => Ok(Vec::new()),
        }
    }

    fn addon_set_mut(&mut self) -> CoreResult<&mut AddonSet> {
        let description = &self.description;
        self.addons.as_mut().ok_or_else(|| CoreError::AddonsUnsupported {
            description: description.clone(),
        })
    }

    // -------------------------------------------------------------------------
    // Construction from configuration
    // -------------------------------------------------------------------------

    /// Builds an item from its configuration form.
    ///
    /// Items with an `addons` table become structured unit prices, the rest
    /// simple rows. Discounts are applied in order; a `%` discount is
    /// converted against the effective price left by the ones before it.
    pub fn from_spec(spec: PricingItemSpec, config: &PricingConfig) -> CoreResult<Self> {
        validate_description(&spec.description)?;
        let price = Money::parse_or(&spec.price, &config.currency)?;
        let unit = spec.unit_type.measure(&spec.unit)?;
        let quantity = match &spec.qty {
            Some(qty) => spec.unit_type.measure(qty)?,
            None => unit.clone(),
        };
        validate_quantity(&quantity)?;

        let item = match spec.addons {
            Some(catalog) => PricingItem::structured(spec.description, price, Rc::new(catalog), config),
            None => PricingItem::simple_row(spec.description, price, config),
        };
        let mut item = item
            .with_quantity(quantity)
            .with_unit(unit)
            .with_tax(TaxDefinitionList::or_default(spec.tax, &config.default_tax));

        for discount in spec.discounts {
            validate_identifier("discount identifier", &discount.identifier)?;
            match discount.amount.parse::<Percentage>() {
                Ok(rate) => {
                    item.apply_percentage_discount(discount.identifier, rate)?;
                }
                Err(_) => {
                    let amount = Money::parse_or(&discount.amount, item.currency())?;
                    item.apply_discount(discount.identifier, amount);
                }
            }
        }

        debug!(item = %item.description, kind = %item.kind, "Built pricing item from spec");
        Ok(item)
    }
}

impl Priceable for PricingItem {
    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn quantity(&self) -> Measure {
        self.base.quantity()
    }

    fn unit(&self) -> Measure {
        self.base.unit()
    }

    fn base_price(&self) -> CoreResult<Money> {
        Ok(self.price.clone())
    }

    fn effective_price(&self) -> CoreResult<Money> {
        let base = self.base_price()?;
        base.try_sub(&self.discounts.total(base.currency())?)
    }

    fn taxes(&self) -> CoreResult<Breakdown> {
        self.tax.breakdown(&self.extended_price()?)
    }

    fn discounts(&self) -> CoreResult<Breakdown> {
        let mut breakdown = Breakdown::new();
        for (identifier, amount) in self.discounts.iter() {
            breakdown.push(identifier, amount.clone());
        }
        Ok(breakdown)
    }

    fn included_addons(&self) -> CoreResult<Vec<Rc<dyn Priceable>>> {
        Ok(self
            .resolved_addons()?
            .into_iter()
            .map(|addon| Rc::new(addon) as Rc<dyn Priceable>)
            .collect())
    }
}

/// `<SimplePricingRow Widget 100 INR 90 INR 212.40 INR>`
impl fmt::Display for PricingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |price: CoreResult<Money>| match price {
            Ok(price) => price.to_string(),
            Err(_) => "n/a".to_string(),
        };
        write!(
            f,
            "<{} {} {} {} {}>",
            self.kind,
            self.description,
            show(self.base_price()),
            show(self.effective_price()),
            show(self.total_price())
        )
    }
}

// =============================================================================
// Configuration Form
// =============================================================================

/// A pricing item as written in configuration.
///
/// ```toml
/// desc = "Server rental"
/// price = "4500"
/// qty = "3 months"
/// unit = "1 month"
/// unit_type = "DateSpan"
/// tax = [{ identifier = "GST", rate = "18%" }]
/// discounts = [{ identifier = "annual", amount = "10%" }]
///
/// [addons.support]
/// desc = "Support"
/// price = "12%"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PricingItemSpec {
    #[serde(alias = "desc")]
    pub description: String,
    /// Money literal; a bare number is in the configured currency.
    pub price: String,
    /// Defaults to one unit.
    #[serde(default)]
    pub qty: Option<UnitLiteral>,
    #[serde(default = "one_literal")]
    pub unit: UnitLiteral,
    /// Applies to both `qty` and `unit`.
    #[serde(default)]
    pub unit_type: UnitType,
    #[serde(default)]
    pub tax: Option<TaxDefinitionList>,
    #[serde(default)]
    pub addons: Option<AddonCatalog>,
    #[serde(default)]
    pub discounts: Vec<DiscountSpec>,
}

/// A discount as written in configuration: money or a `%` rate.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountSpec {
    #[serde(alias = "ident")]
    pub identifier: String,
    pub amount: String,
}

fn one_literal() -> UnitLiteral {
    UnitLiteral::Number(rust_decimal::Decimal::ONE)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::AddonDefinition;
    use crate::error::ParseError;
    use crate::types::DateSpan;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn inr(amount: Decimal) -> Money {
        Money::new(amount, "INR")
    }

    fn vat() -> TaxDefinitionList {
        TaxDefinitionList::parse(&[("VAT", "18%")]).unwrap()
    }

    fn gift_wrap_catalog() -> Rc<AddonCatalog> {
        Rc::new(AddonCatalog::new().with(
            "gift-wrap",
            AddonDefinition::new("gift-wrap", Percentage::from_percent(dec!(5))),
        ))
    }

    #[test]
    fn test_bare_base_has_no_price() {
        let base = PricingBase::default();
        assert!(matches!(
            base.base_price(),
            Err(CoreError::Unimplemented { operation: "base_price", .. })
        ));
        // every derived price fails loudly too, never defaults to zero
        assert!(base.effective_price().is_err());
        assert!(base.total_price().is_err());
    }

    #[test]
    fn test_pipeline() {
        let mut item = PricingItem::simple_row("Widget", inr(dec!(100)), &PricingConfig::default())
            .with_quantity(2)
            .with_tax(vat());
        item.apply_discount("promo", inr(dec!(10)));

        assert_eq!(item.base_price().unwrap(), inr(dec!(100)));
        assert_eq!(item.effective_price().unwrap(), inr(dec!(90)));
        assert_eq!(item.extended_price().unwrap(), inr(dec!(180)));
        assert_eq!(item.taxes().unwrap().into_lines(), vec![("VAT".to_string(), inr(dec!(32.4)))]);
        assert_eq!(item.total_price().unwrap(), inr(dec!(212.4)));
    }

    #[test]
    fn test_reads_follow_mutations() {
        let mut item = PricingItem::simple_row("Widget", inr(dec!(100)), &PricingConfig::default())
            .with_tax(vat());
        assert_eq!(item.effective_price().unwrap(), inr(dec!(100)));

        item.apply_discount("promo", inr(dec!(30)));
        assert_eq!(item.effective_price().unwrap(), inr(dec!(70)));

        item.reset_discounts();
        assert_eq!(item.effective_price().unwrap(), inr(dec!(100)));
    }

    #[test]
    fn test_default_tax_from_config() {
        let config = PricingConfig::default();
        let item = PricingItem::simple_row("Widget", inr(dec!(100)), &config);
        assert_eq!(item.tax(), &config.default_tax);
    }

    #[test]
    fn test_discount_in_other_currency_fails_on_read() {
        let mut item = PricingItem::simple_row("Widget", inr(dec!(100)), &PricingConfig::default());
        item.apply_discount("promo", Money::new(dec!(10), "USD"));
        assert!(matches!(
            item.effective_price(),
            Err(CoreError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_percentage_discount_uses_current_effective_price() {
        let mut item = PricingItem::simple_row("Widget", inr(dec!(200)), &PricingConfig::default());
        item.apply_discount("flat", inr(dec!(100)));
        let amount = item
            .apply_percentage_discount("seasonal", Percentage::from_percent(dec!(10)))
            .unwrap();
        assert_eq!(amount, inr(dec!(10)));
        assert_eq!(item.effective_price().unwrap(), inr(dec!(90)));
    }

    #[test]
    fn test_addon_follows_later_discounts() {
        let mut item = PricingItem::structured(
            "Hamper",
            inr(dec!(100)),
            gift_wrap_catalog(),
            &PricingConfig::default(),
        );
        item.include_addon("expedite", 1, Some("10%"), TaxOverride::Inherit)
            .unwrap();
        item.apply_discount("promo", inr(dec!(20)));

        let addons = item.resolved_addons().unwrap();
        assert_eq!(addons[0].price, inr(dec!(8)));
    }

    #[test]
    fn test_simple_row_rejects_addons() {
        let mut item = PricingItem::simple_row("Widget", inr(dec!(100)), &PricingConfig::default());
        assert!(matches!(
            item.include_addon("gift-wrap", 1, None, TaxOverride::Inherit),
            Err(CoreError::AddonsUnsupported { .. })
        ));
        assert!(item.included_addons().unwrap().is_empty());
    }

    #[test]
    fn test_reset_addons() {
        let mut item = PricingItem::structured(
            "Hamper",
            inr(dec!(100)),
            gift_wrap_catalog(),
            &PricingConfig::default(),
        );
        item.include_addon("gift-wrap", 1, None, TaxOverride::Inherit)
            .unwrap();
        assert_eq!(item.included_addons().unwrap().len(), 1);
        item.reset_addons();
        assert!(item.included_addons().unwrap().is_empty());
    }

    #[test]
    fn test_reset_qty() {
        let mut item = PricingItem::simple_row("Rental", inr(dec!(3000)), &PricingConfig::default())
            .with_quantity(DateSpan::months(6))
            .with_unit(DateSpan::months(1));
        assert_eq!(item.extended_price().unwrap(), inr(dec!(18000)));

        item.reset_qty();
        assert_eq!(item.quantity(), Measure::Span(DateSpan::months(1)));
        assert_eq!(item.extended_price().unwrap(), inr(dec!(3000)));
    }

    #[test]
    fn test_count_quantity_with_span_unit_fails() {
        let item = PricingItem::simple_row("Rental", inr(dec!(3000)), &PricingConfig::default())
            .with_quantity(6)
            .with_unit(DateSpan::months(1));
        assert!(matches!(
            item.extended_price(),
            Err(CoreError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_display() {
        let item = PricingItem::simple_row("Widget", inr(dec!(100)), &PricingConfig::default())
            .with_tax(vat());
        let rendered = item.to_string();
        assert!(rendered.starts_with("<SimplePricingRow Widget 100 INR 100 INR 118"));
        assert!(rendered.ends_with(" INR>"));
    }

    #[test]
    fn test_from_spec() {
        let spec: PricingItemSpec = serde_json::from_str(
            r#"{
                "desc": "Server rental",
                "price": "4500",
                "qty": "3 months",
                "unit": "1 month",
                "unit_type": "DateSpan",
                "discounts": [
                    { "identifier": "loyalty", "amount": "500" },
                    { "identifier": "annual", "amount": "10%" }
                ],
                "addons": { "support": { "desc": "Support", "price": "12%" } }
            }"#,
        )
        .unwrap();

        let item = PricingItem::from_spec(spec, &PricingConfig::default()).unwrap();
        assert_eq!(item.kind(), ItemKind::StructuredUnit);
        // 4500 − 500 − 10% of 4000
        assert_eq!(item.effective_price().unwrap(), inr(dec!(3600)));
        assert_eq!(item.extended_price().unwrap(), inr(dec!(10800)));
        assert_eq!(item.discounts().unwrap().len(), 2);
    }

    #[test]
    fn test_from_spec_quantity_defaults_to_one_unit() {
        let spec: PricingItemSpec = serde_json::from_str(
            r#"{ "desc": "Hosting", "price": "900", "unit": "1 year", "unit_type": "DateSpan" }"#,
        )
        .unwrap();
        let item = PricingItem::from_spec(spec, &PricingConfig::default()).unwrap();
        assert_eq!(item.kind(), ItemKind::SimpleRow);
        assert_eq!(item.quantity(), Measure::Span(DateSpan::months(12)));
        assert_eq!(item.extended_price().unwrap(), inr(dec!(900)));
    }

    #[test]
    fn test_extended_price_overflow_is_an_error() {
        let item = PricingItem::simple_row(
            "Bulk",
            inr(Decimal::from(1_000_000_000_000_000i64)),
            &PricingConfig::default(),
        )
        .with_quantity(Decimal::from(1_000_000_000_000_000_000i64));

        assert!(matches!(
            item.extended_price(),
            Err(CoreError::Overflow { .. })
        ));
        assert!(item.total_price().is_err());
    }

    #[test]
    fn test_from_spec_rejects_overflowing_span() {
        let spec: PricingItemSpec = serde_json::from_str(
            r#"{ "desc": "Lease", "price": "10", "qty": "400000000 years", "unit": "1 month", "unit_type": "DateSpan" }"#,
        )
        .unwrap();
        assert!(matches!(
            PricingItem::from_spec(spec, &PricingConfig::default()),
            Err(CoreError::Parse(ParseError::InvalidUnit { .. }))
        ));
    }

    #[test]
    fn test_from_spec_propagates_parse_errors() {
        let spec: PricingItemSpec =
            serde_json::from_str(r#"{ "desc": "Widget", "price": "a lot" }"#).unwrap();
        assert!(matches!(
            PricingItem::from_spec(spec, &PricingConfig::default()),
            Err(CoreError::Parse(_))
        ));
    }
}
