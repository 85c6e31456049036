//! # Price Summaries
//!
//! Plain-data snapshots of a priceable, for rendering and for handing to a
//! frontend.
//!
//! Priceables compute everything on read and share items through `Rc`, so
//! they stay on one thread. A [`PriceSummary`] is the owned, `Send + Sync`
//! result of reading one once.
//!
//! ## Shape
//! ```text
//! PriceSummary
//! ├── description, base / effective / extended / total price
//! ├── taxes:     [AmountLine { identifier, amount }]
//! ├── discounts: [AmountLine { identifier, amount }]
//! └── addons:    [PriceSummary]   (one per included add-on, recursive)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::breakdown::Breakdown;
use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing::Priceable;

/// One `(identifier, amount)` line of a tax or discount breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AmountLine {
    pub identifier: String,
    pub amount: Money,
}

/// Every price a priceable reports, captured at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceSummary {
    pub description: Option<String>,
    pub base_price: Money,
    pub effective_price: Money,
    pub extended_price: Money,
    pub total_price: Money,
    pub taxes: Vec<AmountLine>,
    pub discounts: Vec<AmountLine>,
    /// Summaries of the included add-ons, in the order the priceable lists them.
    pub addons: Vec<PriceSummary>,
}

impl PriceSummary {
    /// Reads every price of `priceable`, recursing into its add-ons.
    ///
    /// The first failing read is returned as the error.
    pub fn from_priceable(priceable: &dyn Priceable) -> CoreResult<Self> {
        let addons = priceable
            .included_addons()?
            .iter()
            .map(|addon| PriceSummary::from_priceable(addon.as_ref()))
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(PriceSummary {
            description: priceable.description().map(str::to_string),
            base_price: priceable.base_price()?,
            effective_price: priceable.effective_price()?,
            extended_price: priceable.extended_price()?,
            total_price: priceable.total_price()?,
            taxes: lines(priceable.taxes()?),
            discounts: lines(priceable.discounts()?),
            addons,
        })
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn lines(breakdown: Breakdown) -> Vec<AmountLine> {
    breakdown
        .into_iter()
        .map(|(identifier, amount)| AmountLine { identifier, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::AddonCatalog;
    use crate::collector::PriceCollector;
    use crate::config::PricingConfig;
    use crate::pricing::{PricingBase, PricingItem};
    use crate::tax::{TaxDefinitionList, TaxOverride};
    use rust_decimal_macros::dec;
    use std::rc::Rc;

    fn hamper() -> PricingItem {
        let mut item = PricingItem::structured(
            "Hamper",
            Money::new(dec!(200), "INR"),
            Rc::new(AddonCatalog::new()),
            &PricingConfig::default(),
        )
        .with_tax(TaxDefinitionList::parse(&[("VAT", "18%")]).unwrap());
        item.apply_discount("promo", Money::new(dec!(20), "INR"));
        item.include_addon("gift-wrap", 1, Some("5%"), TaxOverride::Inherit)
            .unwrap();
        item
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_summary_is_send_sync() {
        assert_send_sync::<PriceSummary>();
    }

    #[test]
    fn test_from_item() {
        let summary = PriceSummary::from_priceable(&hamper()).unwrap();

        assert_eq!(summary.description.as_deref(), Some("Hamper"));
        assert_eq!(summary.effective_price.amount(), dec!(180));
        assert_eq!(summary.total_price.amount(), dec!(212.4));
        assert_eq!(summary.discounts[0].identifier, "promo");
        assert_eq!(summary.taxes[0].amount.amount(), dec!(32.4));

        assert_eq!(summary.addons.len(), 1);
        let addon = &summary.addons[0];
        assert_eq!(addon.description.as_deref(), Some("gift-wrap"));
        assert_eq!(addon.base_price.amount(), dec!(9));
        assert!(addon.addons.is_empty());
    }

    #[test]
    fn test_from_collector() {
        let mut collector = PriceCollector::new("INR").with_description("Order");
        collector.append(Rc::new(hamper()));
        collector.append(Rc::new(hamper()));

        let summary = PriceSummary::from_priceable(&collector).unwrap();
        assert_eq!(summary.extended_price.amount(), dec!(360));
        assert_eq!(summary.discounts[0].amount.amount(), dec!(40));
        // one bucket per add-on description
        assert_eq!(summary.addons.len(), 1);
        assert_eq!(summary.addons[0].extended_price.amount(), dec!(18));
    }

    #[test]
    fn test_failing_read_is_returned() {
        assert!(PriceSummary::from_priceable(&PricingBase::default()).is_err());
    }

    #[test]
    fn test_to_json() {
        let summary = PriceSummary::from_priceable(&hamper()).unwrap();
        let json = summary.to_json().unwrap();
        assert!(json.contains("\"description\": \"Hamper\""));
        assert!(json.contains("\"identifier\": \"promo\""));

        let parsed: PriceSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }
}
