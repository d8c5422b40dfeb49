//! List view and basket property tests
//!
//! - Property 1: page count and page length bounds
//! - Property 2: a search without matches yields no pages
//! - Property 3: margin is disposal minus acquisition
//! - Property 4: rejected lines leave the basket unchanged
//! - Property 5: empty baskets cannot be submitted, payloads carry no display fields
//! - Property 8: out-of-range removal is a no-op

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    AggregateTotals, BasketKind, Category, LineItem, LineItemBasket, ListViewModel, Product,
    Purchase, PurchaseLine, UnresolvedCost,
};

fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        purchase_price: Decimal::from(100),
        sale_price: Decimal::from(150),
        stock_current: 10,
        stock_minimum: 2,
        category: Some(Category {
            id: 1,
            name: "Divers".into(),
        }),
    }
}

fn purchase(id: i64, lines: Vec<(i32, Option<i64>, i64)>) -> Purchase {
    Purchase {
        id,
        total: Decimal::ZERO,
        lines: lines
            .into_iter()
            .map(|(quantity, cost, sale)| PurchaseLine {
                id: None,
                user_id: Some(1),
                supplier_id: Some(1),
                product_id: 1,
                quantity,
                purchase_price: cost.map(Decimal::from),
                sale_price: Some(Decimal::from(sale)),
                product: None,
            })
            .collect(),
    }
}

// ============================================================================
// Strategies
// ============================================================================

fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..40)
}

fn purchases_strategy() -> impl Strategy<Value = Vec<Purchase>> {
    let line = (1..20i32, prop::option::of(0..5_000i64), 0..10_000i64);
    prop::collection::vec(prop::collection::vec(line, 0..4), 0..8).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, lines)| purchase(i as i64 + 1, lines))
            .collect()
    })
}

fn valid_sale_line() -> impl Strategy<Value = LineItem> {
    (1..1_000i64, 1..50i32, 1..100_000i64)
        .prop_map(|(id, qty, price)| LineItem::new(id, qty).with_prices(None, Decimal::from(price)))
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: pageCount = ceil(matches / P) and no page exceeds P rows
    #[test]
    fn test_page_bounds(names in names_strategy(), page_size in 1..10usize, term in "[a-z]{0,2}") {
        let mut view = ListViewModel::new(page_size);
        view.set_records(names.iter().enumerate().map(|(i, n)| product(i as i64, n)).collect());
        view.set_search_term(term.as_str());

        let matches = view.filtered_count();
        prop_assert_eq!(view.page_count(), matches.div_ceil(page_size));

        let mut seen = 0;
        for page in 1..=view.page_count() {
            view.go_to_page(page);
            let rows = view.visible_page().len();
            prop_assert!(rows <= page_size);
            prop_assert!(rows > 0);
            seen += rows;
        }
        prop_assert_eq!(seen, matches);
    }

    /// Property 2: a term matching nothing yields zero pages and an empty page 1
    #[test]
    fn test_no_match_yields_no_pages(names in names_strategy(), page_size in 1..10usize) {
        let mut view = ListViewModel::new(page_size);
        view.set_records(names.iter().enumerate().map(|(i, n)| product(i as i64, n)).collect());
        view.set_search_term("#no-such-product#");

        prop_assert_eq!(view.page_count(), 0);
        prop_assert_eq!(view.current_page(), 1);
        prop_assert!(view.visible_page().is_empty());
        prop_assert_eq!(view.records().len(), names.len());
    }

    /// Property 3: margin is always disposal minus acquisition, whatever the policy
    #[test]
    fn test_margin_identity(records in purchases_strategy(), at_sale in any::<bool>()) {
        let policy = if at_sale { UnresolvedCost::AtSalePrice } else { UnresolvedCost::Zero };
        let mut view = ListViewModel::new(5);
        view.set_records(records);
        view.set_search_term("zzz");

        let totals = view.aggregate_totals(policy);
        prop_assert_eq!(totals.margin, totals.total_disposal_value - totals.total_acquisition_value);
    }

    /// Property 4: invalid quantities or sale prices are rejected without side effects
    #[test]
    fn test_rejected_line_leaves_basket_unchanged(
        existing in prop::collection::vec(valid_sale_line(), 0..5),
        quantity in -5..=0i32,
        price in -1_000..=0i64,
        bad_quantity in any::<bool>(),
    ) {
        let mut basket = LineItemBasket::new(BasketKind::Sale);
        for line in existing.iter().cloned() {
            basket.add_or_replace(line, None).unwrap();
        }
        let before = basket.lines().to_vec();

        let line = if bad_quantity {
            LineItem::new(1, quantity).with_prices(None, Decimal::from(10))
        } else {
            LineItem::new(1, 1).with_prices(None, Decimal::from(price))
        };
        prop_assert!(basket.add_or_replace(line.clone(), None).is_err());
        if !before.is_empty() {
            prop_assert!(basket.add_or_replace(line, Some(0)).is_err());
        }
        prop_assert_eq!(basket.lines(), before.as_slice());
    }

    /// Property 5: payload lines never carry the display-only product copy
    #[test]
    fn test_payload_has_no_display_fields(lines in prop::collection::vec(valid_sale_line(), 1..6)) {
        let mut basket = LineItemBasket::new(BasketKind::Sale);
        for mut line in lines {
            line.product = Some((&product(line.product_id, "Riz")).into());
            basket.add_or_replace(line, None).unwrap();
        }
        let body = serde_json::to_value(basket.to_submission_payload().unwrap()).unwrap();
        for line in body["lignes"].as_array().unwrap() {
            prop_assert!(line.get("Produit").is_none());
            prop_assert!(line.get("produitId").is_some());
        }
    }

    /// Property 8: removing past the end is a silent no-op
    #[test]
    fn test_out_of_range_remove(lines in prop::collection::vec(valid_sale_line(), 0..6), extra in 0..10usize) {
        let mut basket = LineItemBasket::new(BasketKind::Sale);
        for line in lines {
            basket.add_or_replace(line, None).unwrap();
        }
        let len = basket.len();
        prop_assert!(basket.remove_at(len + extra).is_none());
        prop_assert_eq!(basket.len(), len);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_empty_collection_totals_are_zero() {
    let view: ListViewModel<Purchase> = ListViewModel::new(5);
    assert_eq!(view.aggregate_totals(UnresolvedCost::Zero), AggregateTotals::default());
}

#[test]
fn test_empty_basket_cannot_be_submitted() {
    let mut basket = LineItemBasket::new(BasketKind::Purchase);
    assert!(basket.to_submission_payload().is_err());
    assert!(basket.begin_submission().is_err());
}
