//! End-to-end transform.
//!
//! Customers and products are cleaned independently; their id sets then act
//! as validity oracles for the reconciler, whose output feeds the order
//! aggregator. The aggregator's line set is the final transaction set.

use sha2::{Digest, Sha256};
use tracing::info;

use fleximart_ingest::RawTables;
use fleximart_model::{CleanSet, Customer, Order, OrderItem, Product, TransactionLine};

use crate::aggregate::{OrderSet, aggregate_orders};
use crate::clean::{clean_customers, clean_products};
use crate::error::Result;
use crate::reconcile::{IdSet, Reconciled, reconcile_transactions};
use crate::sources::RawSources;

/// Everything the load and report stages need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub customers: CleanSet<Customer>,
    pub products: CleanSet<Product>,
    pub transactions: CleanSet<TransactionLine>,
    /// Quantity/unit price values that were missing or unparseable and counted as zero.
    pub coerced_numeric_fields: usize,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
}

/// Run every transform stage over already-bound raw records.
pub fn transform(sources: RawSources) -> TransformOutput {
    let RawSources {
        customers,
        products,
        sales,
    } = sources;
    let customers = clean_customers(customers);
    let products = clean_products(products);

    let customer_ids = IdSet::of_customers(&customers.records);
    let product_ids = IdSet::of_products(&products.records);
    let Reconciled {
        lines,
        coerced_fields,
    } = reconcile_transactions(sales, &customer_ids, &product_ids);

    let OrderSet {
        lines: transactions,
        orders,
        items,
    } = aggregate_orders(lines);
    info!(
        customers = customers.emitted(),
        products = products.emitted(),
        lines = transactions.emitted(),
        orders = orders.len(),
        "transform complete"
    );
    TransformOutput {
        customers,
        products,
        transactions,
        coerced_numeric_fields: coerced_fields,
        orders,
        order_items: items,
    }
}

/// Bind the raw tables and transform them.
///
/// # Errors
///
/// Fails only on structural problems with the sources (see
/// [`crate::sources::raw_transaction_lines`]).
pub fn transform_tables(tables: &RawTables) -> Result<TransformOutput> {
    Ok(transform(RawSources::from_tables(tables)?))
}

/// SHA-256 over the serialized clean customer, product, order and order-item
/// sets, as lowercase hex. Equal inputs always produce equal fingerprints.
pub fn fingerprint(output: &TransformOutput) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(&output.customers.records)?);
    hasher.update(serde_json::to_vec(&output.products.records)?);
    hasher.update(serde_json::to_vec(&output.orders)?);
    hasher.update(serde_json::to_vec(&output.order_items)?);
    Ok(hex::encode(hasher.finalize()))
}
