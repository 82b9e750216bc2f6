//! Property tests for the cleaners and the reconciler.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rust_decimal::Decimal;

use fleximart_model::{RawCustomer, RawProduct, RawTransactionLine};
use fleximart_transform::normalization::normalize_identifier;
use fleximart_transform::{
    IdSet, aggregate_orders, clean_customers, clean_products, reconcile_transactions,
};

fn arb_raw_id() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[A-Za-z-]{0,4}[0-9]{0,4}".prop_map(Some),
        "[ -~]{0,8}".prop_map(Some),
    ]
}

fn arb_amount_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        (-500i64..5000, 0u32..3).prop_map(|(n, scale)| Some(Decimal::new(n, scale).to_string())),
        "[a-z]{1,5}".prop_map(Some),
    ]
}

fn arb_customer() -> impl Strategy<Value = RawCustomer> {
    (arb_raw_id(), prop::option::of("[a-e]@x\\.com"), prop::option::of("[0-9 +-]{0,14}")).prop_map(
        |(customer_id, email, phone)| RawCustomer {
            customer_id,
            email,
            phone,
            ..RawCustomer::default()
        },
    )
}

fn arb_product() -> impl Strategy<Value = RawProduct> {
    (arb_raw_id(), arb_amount_text(), arb_amount_text()).prop_map(
        |(product_id, price, stock_quantity)| RawProduct {
            product_id,
            price,
            stock_quantity,
            ..RawProduct::default()
        },
    )
}

fn arb_line() -> impl Strategy<Value = RawTransactionLine> {
    (
        arb_raw_id(),
        arb_raw_id(),
        arb_raw_id(),
        arb_amount_text(),
        arb_amount_text(),
        prop_oneof![
            Just(Some("2024-03-05".to_string())),
            Just(Some("05/03/2024".to_string())),
            Just(Some("someday".to_string())),
            Just(None),
        ],
    )
        .prop_map(
            |(transaction_id, customer_id, product_id, quantity, unit_price, transaction_date)| {
                RawTransactionLine {
                    transaction_id,
                    customer_id,
                    product_id,
                    quantity,
                    unit_price,
                    transaction_date,
                }
            },
        )
}

proptest! {
    #[test]
    fn identifiers_are_positive_and_ignore_decoration(prefix in "[A-Za-z-]{0,5}", n in 1i64..1_000_000) {
        let raw = format!("{prefix}{n:07}");
        prop_assert_eq!(normalize_identifier(&raw), Some(n));
    }

    #[test]
    fn clean_customers_have_unique_positive_ids_and_emails(raw in prop::collection::vec(arb_customer(), 0..40)) {
        let set = clean_customers(raw);
        prop_assert_eq!(set.read, set.emitted() + set.rejected());
        let mut ids = BTreeSet::new();
        let mut emails = BTreeSet::new();
        for customer in &set.records {
            prop_assert!(customer.customer_id > 0);
            prop_assert!(ids.insert(customer.customer_id));
            prop_assert!(emails.insert(customer.email.clone()));
            if let Some(phone) = &customer.phone {
                prop_assert!(phone.starts_with('+'));
            }
        }
    }

    #[test]
    fn clean_products_are_priced_and_stocked(raw in prop::collection::vec(arb_product(), 0..40)) {
        let set = clean_products(raw);
        prop_assert_eq!(set.read, set.emitted() + set.rejected());
        let mut ids = BTreeSet::new();
        for product in &set.records {
            prop_assert!(product.product_id > 0);
            prop_assert!(ids.insert(product.product_id));
            prop_assert!(product.price > Decimal::ZERO);
            prop_assert!(product.stock_quantity >= 0);
        }
    }

    #[test]
    fn reconciled_lines_resolve_and_orders_sum(raw in prop::collection::vec(arb_line(), 0..40)) {
        let customers: IdSet = (1..=20).collect();
        let products: IdSet = (1..=20).step_by(2).collect();
        let result = reconcile_transactions(raw, &customers, &products);
        let lines = &result.lines;
        prop_assert_eq!(lines.read, lines.emitted() + lines.rejected());
        for line in &lines.records {
            prop_assert!(customers.contains(line.customer_id));
            prop_assert!(products.contains(line.product_id));
            prop_assert_eq!(line.amount, line.quantity * line.unit_price);
            prop_assert!(line.amount >= Decimal::ZERO);
        }

        let set = aggregate_orders(result.lines);
        prop_assert_eq!(set.items.len(), set.lines.emitted());
        prop_assert_eq!(set.lines.read, set.lines.emitted() + set.lines.rejected());
        let grand_total: Decimal = set.orders.iter().map(|o| o.total_amount).sum();
        let line_total: Decimal = set.lines.records.iter().map(|l| l.amount).sum();
        prop_assert_eq!(grand_total, line_total);
    }
}
