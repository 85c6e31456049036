//! # Discount Ledger
//!
//! Per-item list of named discounts, each already expressed as money.
//!
//! Percentage discounts are converted before they reach the ledger, against
//! whatever price the caller chooses (see
//! [`PricingItem::apply_percentage_discount`](crate::pricing::PricingItem::apply_percentage_discount)).

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::{Currency, Money};

/// One named discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub identifier: String,
    pub amount: Money,
}

/// Ordered discounts for a single item.
///
/// The ledger stores what it is given. Entries are not merged by identifier
/// and currencies are not checked until the total is taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountLedger {
    entries: Vec<Discount>,
}

impl DiscountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a discount.
    pub fn apply(&mut self, identifier: impl Into<String>, amount: Money) {
        self.entries.push(Discount {
            identifier: identifier.into(),
            amount,
        });
    }

    /// Yields the stored `(identifier, amount)` pairs verbatim.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Money)> {
        self.entries
            .iter()
            .map(|discount| (discount.identifier.as_str(), &discount.amount))
    }

    /// Sum of all discounts in `currency`.
    ///
    /// Fails with `CurrencyMismatch` if any entry is in another currency.
    pub fn total(&self, currency: &Currency) -> CoreResult<Money> {
        Money::try_sum(currency, self.entries.iter().map(|discount| &discount.amount))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
