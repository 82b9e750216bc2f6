//! Product cleaning.

use tracing::{debug, debug_span, trace};

use fleximart_model::{CleanSet, Product, RawProduct, RejectReason, RowOutcome};

use crate::clean::{Identified, identify};
use crate::dedupe::first_occurrence;
use crate::normalization::{coerce_stock_quantity, parse_positive_decimal, title_case};

/// A product with every field normalized except the price.
struct Unpriced {
    product_id: i64,
    product_name: Option<String>,
    category: Option<String>,
    stock_quantity: i64,
    price: Option<String>,
}

fn raw_product_id(raw: &RawProduct) -> Option<&str> {
    raw.product_id.as_deref()
}

fn normalize_fields(row: Identified<RawProduct>) -> Unpriced {
    let Identified { id, raw } = row;
    Unpriced {
        product_id: id,
        product_name: raw.product_name,
        category: raw.category.as_deref().map(title_case),
        stock_quantity: coerce_stock_quantity(raw.stock_quantity.as_deref()),
        price: raw.price,
    }
}

fn require_price(row: Unpriced) -> RowOutcome<Product> {
    match row.price.as_deref().and_then(parse_positive_decimal) {
        Some(price) => RowOutcome::Valid(Product {
            product_id: row.product_id,
            product_name: row.product_name,
            category: row.category,
            price,
            stock_quantity: row.stock_quantity,
        }),
        None => {
            trace!(product_id = row.product_id, price = ?row.price, "invalid price");
            RowOutcome::Rejected(RejectReason::InvalidPrice)
        }
    }
}

/// Clean raw products.
///
/// Stages, in order: normalize the id and drop unrepresentable ids, keep the
/// first row per id, title-case the category, coerce the stock count, then
/// drop rows whose price is missing, unparseable or not positive.
pub fn clean_products(raw: Vec<RawProduct>) -> CleanSet<Product> {
    let _span = debug_span!("clean_products", rows = raw.len()).entered();
    let set = CleanSet::new(raw)
        .apply(|row| identify(row, raw_product_id))
        .apply(first_occurrence(Identified::id, RejectReason::DuplicateId))
        .map(normalize_fields)
        .apply(require_price);
    debug!(
        read = set.read,
        kept = set.emitted(),
        rejected = set.rejected(),
        "products cleaned"
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn raw(id: &str, price: Option<&str>) -> RawProduct {
        RawProduct {
            product_id: Some(id.to_string()),
            product_name: Some("Desk Lamp".to_string()),
            category: Some("home & KITCHEN".to_string()),
            price: price.map(str::to_string),
            stock_quantity: None,
        }
    }

    #[test]
    fn normalizes_category_and_stock() {
        let set = clean_products(vec![raw("P-001", Some("24.50"))]);
        let product = &set.records[0];
        assert_eq!(product.product_id, 1);
        assert_eq!(product.category.as_deref(), Some("Home & Kitchen"));
        assert_eq!(product.stock_quantity, 0);
        assert_eq!(product.price, Decimal::new(2450, 2));
    }

    #[test]
    fn rejects_missing_unparseable_and_non_positive_prices() {
        let set = clean_products(vec![
            raw("P1", None),
            raw("P2", Some("free")),
            raw("P3", Some("0")),
            raw("P4", Some("-5")),
            raw("P5", Some("5")),
        ]);
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].product_id, 5);
        assert_eq!(set.rejections.count(RejectReason::InvalidPrice), 4);
    }

    #[test]
    fn rejects_digitless_ids_and_duplicates() {
        let set = clean_products(vec![
            raw("PROD", Some("1")),
            raw("P10", Some("1")),
            raw("10", Some("2")),
        ]);
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].price, Decimal::from(1));
        assert_eq!(set.rejections.count(RejectReason::UnrepresentableId), 1);
        assert_eq!(set.rejections.count(RejectReason::DuplicateId), 1);
        assert_eq!(set.rejected(), set.read - set.emitted());
    }
}
