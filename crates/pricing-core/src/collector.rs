//! # Price Collector
//!
//! Rolls many priceables up into one, keeping per-identifier breakdowns.
//!
//! ## Aggregation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     PriceCollector (qty 1, unit 1)                      │
//! │                                                                         │
//! │  base_price       Σ item.base_price      × item.qty/item.unit          │
//! │  effective_price  Σ item.effective_price × item.qty/item.unit          │
//! │  extended_price   Σ item.extended_price      (no extra scaling)        │
//! │  total_price      Σ item.total_price                                   │
//! │                                                                         │
//! │  discounts / taxes                                                      │
//! │    bucketed by identifier over items AND rolled-up add-ons,            │
//! │    listed in first-seen order                                          │
//! │                                                                         │
//! │  included_addons                                                        │
//! │    every item's add-ons grouped by description                         │
//! │    ──► one nested PriceCollector per description                       │
//! │                                                                         │
//! │  grand_total      extended + Σ taxes + Σ add-on extended prices        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because a collector is itself [`Priceable`], collectors nest: a collector
//! of collectors aggregates the same way, and the add-on buckets are
//! collectors too.
//!
//! ## Note on `grand_total`
//! Item `total_price` excludes add-ons, so `grand_total` adds them back
//! through `included_addons`. For a flat list of items this equals
//! `Σ item.total + Σ addon.total`. When the items are themselves collectors,
//! their `taxes` already include their add-on taxes and the outer
//! `included_addons` contributes the same add-on taxes again, so the two
//! figures diverge. The formula is kept as is and the divergence is pinned
//! down in tests.

use std::ops::Index;
use std::rc::Rc;
use tracing::{debug, trace};

use crate::breakdown::Breakdown;
use crate::error::CoreResult;
use crate::money::{Currency, Money};
use crate::pricing::Priceable;
use crate::types::Measure;

/// An ordered, append-only aggregate of priceables.
///
/// Items are held through `Rc`, so the same item can be appended to several
/// collectors (for example an order total and a per-category view).
#[derive(Debug, Clone)]
pub struct PriceCollector {
    currency: Currency,
    description: Option<String>,
    items: Vec<Rc<dyn Priceable>>,
}

impl PriceCollector {
    /// An empty collector. Its totals are zero in `currency`.
    pub fn new(currency: impl Into<Currency>) -> Self {
        PriceCollector {
            currency: currency.into(),
            description: None,
            items: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn append(&mut self, item: Rc<dyn Priceable>) {
        debug!(
            collector = self.description.as_deref().unwrap_or("-"),
            item = item.description().unwrap_or("-"),
            position = self.items.len(),
            "Appending to collector"
        );
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<dyn Priceable>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn Priceable>> {
        self.items.iter()
    }

    /// Extended price, plus every tax line, plus the extended price of every
    /// rolled-up add-on. See the module docs for when this double counts.
    pub fn grand_total(&self) -> CoreResult<Money> {
        let mut total = self.extended_price()?;
        total = total.try_add(&self.taxes()?.total(&self.currency)?)?;
        for addon in self.included_addons()? {
            total = total.try_add(&addon.extended_price()?)?;
        }
        Ok(total)
    }

    /// Typed form of [`Priceable::included_addons`]: one collector per
    /// add-on description, in first-seen order.
    pub fn addon_collectors(&self) -> CoreResult<Vec<PriceCollector>> {
        let mut buckets: Vec<PriceCollector> = Vec::new();
        for item in &self.items {
            for addon in item.included_addons()? {
                let description = addon.description().unwrap_or_default().to_string();
                let position = buckets
                    .iter()
                    .position(|bucket| bucket.description.as_deref() == Some(description.as_str()));
                match position {
                    Some(position) => buckets[position].items.push(addon),
                    None => {
                        let mut bucket = PriceCollector::new(self.currency.clone())
                            .with_description(description);
                        bucket.items.push(addon);
                        buckets.push(bucket);
                    }
                }
            }
        }
        trace!(buckets = buckets.len(), "Grouped add-ons");
        Ok(buckets)
    }

    /// Σ price(item) × item.qty / item.unit
    fn scaled_sum<F>(&self, price: F) -> CoreResult<Money>
    where
        F: Fn(&dyn Priceable) -> CoreResult<Money>,
    {
        let mut total = Money::zero(self.currency.clone());
        for item in &self.items {
            let ratio = item.quantity().ratio(&item.unit())?;
            total = total.try_add(&price(item.as_ref())?.try_scale(ratio)?)?;
        }
        Ok(total)
    }

    fn plain_sum<F>(&self, price: F) -> CoreResult<Money>
    where
        F: Fn(&dyn Priceable) -> CoreResult<Money>,
    {
        let mut total = Money::zero(self.currency.clone());
        for item in &self.items {
            total = total.try_add(&price(item.as_ref())?)?;
        }
        Ok(total)
    }

    fn bucketed<F>(&self, lines: F) -> CoreResult<Breakdown>
    where
        F: Fn(&dyn Priceable) -> CoreResult<Breakdown>,
    {
        let mut breakdown = Breakdown::new();
        for item in &self.items {
            breakdown.merge(&lines(item.as_ref())?)?;
        }
        for addon in self.addon_collectors()? {
            breakdown.merge(&lines(&addon)?)?;
        }
        Ok(breakdown)
    }
}

impl Priceable for PriceCollector {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn quantity(&self) -> Measure {
        Measure::one()
    }

    fn unit(&self) -> Measure {
        Measure::one()
    }

    fn base_price(&self) -> CoreResult<Money> {
        self.scaled_sum(|item| item.base_price())
    }

    fn effective_price(&self) -> CoreResult<Money> {
        self.scaled_sum(|item| item.effective_price())
    }

    fn extended_price(&self) -> CoreResult<Money> {
        self.plain_sum(|item| item.extended_price())
    }

    fn total_price(&self) -> CoreResult<Money> {
        self.plain_sum(|item| item.total_price())
    }

    fn taxes(&self) -> CoreResult<Breakdown> {
        self.bucketed(|item| item.taxes())
    }

    fn discounts(&self) -> CoreResult<Breakdown> {
        self.bucketed(|item| item.discounts())
    }

    fn included_addons(&self) -> CoreResult<Vec<Rc<dyn Priceable>>> {
        Ok(self
            .addon_collectors()?
            .into_iter()
            .map(|bucket| Rc::new(bucket) as Rc<dyn Priceable>)
            .collect())
    }
}

/// Panics on an out-of-range index, like `Vec`.
impl Index<usize> for PriceCollector {
    type Output = Rc<dyn Priceable>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
