//! Property-based tests for pricing-core.
//!
//! These tests check that the pricing invariants hold for arbitrary inputs.
//!
//! Run with: cargo test -p pricing-core --test `property_tests`

use pricing_core::{
    AddonCatalog, Money, Percentage, PriceCollector, Priceable, PricingConfig, PricingItem,
    TaxDefinition, TaxDefinitionList, TaxOverride,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::rc::Rc;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_quantity() -> impl Strategy<Value = i64> {
    1i64..50i64
}

/// Whole or half percent rates, zero included.
fn arb_rate() -> impl Strategy<Value = Percentage> {
    (0i64..60i64).prop_map(|n| Percentage::from_percent(Decimal::new(n * 5, 1)))
}

fn arb_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("promo".to_string()),
        Just("loyalty".to_string()),
        Just("staff".to_string()),
        Just("clearance".to_string()),
    ]
}

fn arb_tax_list() -> impl Strategy<Value = TaxDefinitionList> {
    prop::collection::vec(
        (
            prop_oneof![Just("VAT"), Just("CESS"), Just("GST")],
            arb_rate(),
        ),
        1..4,
    )
    .prop_map(|pairs| {
        let definitions = pairs
            .into_iter()
            .map(|(id, rate)| TaxDefinition::new(id, rate).unwrap())
            .collect();
        TaxDefinitionList::new(definitions).unwrap()
    })
}

/// Discounts as (identifier, cents).
fn arb_discounts() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec((arb_identifier(), 0i64..100i64), 0..5)
}

#[derive(Debug, Clone)]
struct ItemInput {
    price: Decimal,
    quantity: i64,
    tax: TaxDefinitionList,
    discounts: Vec<(String, i64)>,
}

fn arb_item() -> impl Strategy<Value = ItemInput> {
    (arb_price(), arb_quantity(), arb_tax_list(), arb_discounts()).prop_map(
        |(price, quantity, tax, discounts)| ItemInput {
            price,
            quantity,
            tax,
            discounts,
        },
    )
}

fn inr(amount: Decimal) -> Money {
    Money::new(amount, "INR")
}

fn build(input: &ItemInput) -> PricingItem {
    let mut item = PricingItem::structured(
        "Item",
        inr(input.price),
        Rc::new(AddonCatalog::new()),
        &PricingConfig::default(),
    )
    .with_quantity(input.quantity)
    .with_tax(input.tax.clone());
    for (identifier, cents) in &input.discounts {
        item.apply_discount(identifier.as_str(), inr(Decimal::new(*cents, 2)));
    }
    item
}

fn sum_lines(lines: &pricing_core::Breakdown) -> Decimal {
    lines.iter().map(|(_, amount)| amount.amount()).sum()
}

// ============================================================================
// Item pipeline
// ============================================================================

proptest! {
    #[test]
    fn prop_effective_is_base_less_discounts(input in arb_item()) {
        let item = build(&input);
        let discounts: Decimal = input
            .discounts
            .iter()
            .map(|(_, cents)| Decimal::new(*cents, 2))
            .sum();
        prop_assert_eq!(
            item.effective_price().unwrap().amount(),
            input.price - discounts
        );
    }

    #[test]
    fn prop_extended_is_effective_times_quantity(input in arb_item()) {
        let item = build(&input);
        prop_assert_eq!(
            item.extended_price().unwrap().amount(),
            item.effective_price().unwrap().amount() * Decimal::from(input.quantity)
        );
    }

    #[test]
    fn prop_total_is_extended_plus_taxes(input in arb_item()) {
        let item = build(&input);
        let taxes = item.taxes().unwrap();
        prop_assert_eq!(
            item.total_price().unwrap().amount(),
            item.extended_price().unwrap().amount() + sum_lines(&taxes)
        );
    }

    #[test]
    fn prop_zero_rates_never_appear(input in arb_item()) {
        let item = build(&input);
        let taxes = item.taxes().unwrap();
        for definition in input.tax.iter() {
            let positive = input
                .tax
                .iter()
                .any(|d| d.identifier() == definition.identifier() && !d.rate().is_zero());
            prop_assert_eq!(taxes.get(definition.identifier()).is_some(), positive);
        }
    }

    #[test]
    fn prop_percentage_addon_tracks_effective_price(input in arb_item(), rate in arb_rate()) {
        let mut item = build(&input);
        item.include_priced_addon("extra", 1, rate.into(), TaxOverride::Inherit).unwrap();
        let addon = &item.resolved_addons().unwrap()[0];
        prop_assert_eq!(&addon.price, &rate.of(&item.effective_price().unwrap()).unwrap());
    }

    #[test]
    fn prop_repeated_reads_are_identical(input in arb_item()) {
        let item = build(&input);
        prop_assert_eq!(item.total_price().unwrap(), item.total_price().unwrap());
        prop_assert_eq!(item.taxes().unwrap(), item.taxes().unwrap());
    }
}

// ============================================================================
// Collectors
// ============================================================================

proptest! {
    #[test]
    fn prop_collector_extended_is_sum_of_items(inputs in prop::collection::vec(arb_item(), 0..6)) {
        let mut collector = PriceCollector::new("INR");
        let mut expected = Decimal::ZERO;
        for input in &inputs {
            let item = build(input);
            expected += item.extended_price().unwrap().amount();
            collector.append(Rc::new(item));
        }
        prop_assert_eq!(collector.extended_price().unwrap().amount(), expected);
    }

    #[test]
    fn prop_bucketing_is_order_independent(inputs in prop::collection::vec(arb_item(), 1..6)) {
        let mut forward = PriceCollector::new("INR");
        let mut backward = PriceCollector::new("INR");
        for input in &inputs {
            forward.append(Rc::new(build(input)));
        }
        for input in inputs.iter().rev() {
            backward.append(Rc::new(build(input)));
        }

        let forward_discounts = forward.discounts().unwrap();
        let backward_discounts = backward.discounts().unwrap();
        prop_assert_eq!(forward_discounts.len(), backward_discounts.len());
        for (identifier, amount) in forward_discounts.iter() {
            prop_assert_eq!(Some(amount), backward_discounts.get(identifier));
        }

        let forward_taxes = forward.taxes().unwrap();
        let backward_taxes = backward.taxes().unwrap();
        for (identifier, amount) in forward_taxes.iter() {
            prop_assert_eq!(Some(amount), backward_taxes.get(identifier));
        }
    }
}
