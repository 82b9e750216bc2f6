//! Transaction reconciliation.
//!
//! Turns raw sales rows into [`TransactionLine`]s whose customer and product
//! references resolve against the clean entity sets.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, debug_span, trace, warn};

use fleximart_model::{
    CleanSet, Customer, Product, RawTransactionLine, RejectReason, RowOutcome, TransactionLine,
};

use crate::dedupe::first_occurrence;
use crate::normalization::{normalize_identifier, parse_day_first_date, parse_non_negative_decimal};

/// Set of valid entity ids, used only for membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet(BTreeSet<i64>);

impl IdSet {
    pub fn of_customers(customers: &[Customer]) -> Self {
        customers.iter().map(|c| c.customer_id).collect()
    }

    pub fn of_products(products: &[Product]) -> Self {
        products.iter().map(|p| p.product_id).collect()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<i64> for IdSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A sales row after id normalization and amount derivation.
///
/// Two lines are exact duplicates when every field here is equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct NormalizedLine {
    order_id: Option<i64>,
    customer_id: Option<i64>,
    product_id: Option<i64>,
    quantity: Decimal,
    unit_price: Decimal,
    amount: Decimal,
    transaction_date: Option<String>,
}

struct DatedLine {
    line: NormalizedLine,
    order_date: NaiveDate,
}

/// Reconciled lines plus how many numeric fields had to be coerced to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub lines: CleanSet<TransactionLine>,
    pub coerced_fields: usize,
}

fn coerce_amount_field(value: Option<&str>, coerced: &mut usize) -> Decimal {
    match value.and_then(parse_non_negative_decimal) {
        Some(value) => value,
        None => {
            *coerced += 1;
            Decimal::ZERO
        }
    }
}

fn normalize_line(raw: RawTransactionLine, coerced: &mut usize) -> RowOutcome<NormalizedLine> {
    let quantity = coerce_amount_field(raw.quantity.as_deref(), coerced);
    let unit_price = coerce_amount_field(raw.unit_price.as_deref(), coerced);
    let Some(amount) = quantity.checked_mul(unit_price) else {
        trace!(quantity = %quantity, unit_price = %unit_price, "line amount overflows");
        return RowOutcome::Rejected(RejectReason::AmountOverflow);
    };
    RowOutcome::Valid(NormalizedLine {
        order_id: raw.transaction_id.as_deref().and_then(normalize_identifier),
        customer_id: raw.customer_id.as_deref().and_then(normalize_identifier),
        product_id: raw.product_id.as_deref().and_then(normalize_identifier),
        quantity,
        unit_price,
        amount,
        transaction_date: raw.transaction_date,
    })
}

fn require_date(line: NormalizedLine) -> RowOutcome<DatedLine> {
    match line.transaction_date.as_deref().and_then(parse_day_first_date) {
        Some(order_date) => RowOutcome::Valid(DatedLine { line, order_date }),
        None => {
            trace!(order_id = ?line.order_id, "unparseable transaction date");
            RowOutcome::Rejected(RejectReason::UnparseableDate)
        }
    }
}

fn resolve_references(
    dated: DatedLine,
    customers: &IdSet,
    products: &IdSet,
) -> RowOutcome<TransactionLine> {
    let DatedLine { line, order_date } = dated;
    let Some(order_id) = line.order_id else {
        return RowOutcome::Rejected(RejectReason::UnrepresentableOrderId);
    };
    let Some(customer_id) = line.customer_id.filter(|id| customers.contains(*id)) else {
        trace!(order_id, customer_id = ?line.customer_id, "unknown customer");
        return RowOutcome::Rejected(RejectReason::UnknownCustomer);
    };
    let Some(product_id) = line.product_id.filter(|id| products.contains(*id)) else {
        trace!(order_id, product_id = ?line.product_id, "unknown product");
        return RowOutcome::Rejected(RejectReason::UnknownProduct);
    };
    RowOutcome::Valid(TransactionLine {
        order_id,
        customer_id,
        product_id,
        quantity: line.quantity,
        unit_price: line.unit_price,
        amount: line.amount,
        order_date,
    })
}

/// Reconcile raw sales rows against the clean customer and product ids.
///
/// Stages, in order: normalize the three ids and derive
/// `amount = quantity × unit_price` (missing or unparseable numbers count as
/// zero), drop exact duplicate lines, drop lines whose date does not parse,
/// then drop lines without a usable order id or whose customer or product is
/// not in the given sets.
pub fn reconcile_transactions(
    raw: Vec<RawTransactionLine>,
    customers: &IdSet,
    products: &IdSet,
) -> Reconciled {
    let _span = debug_span!(
        "reconcile_transactions",
        rows = raw.len(),
        customers = customers.len(),
        products = products.len()
    )
    .entered();
    let mut coerced_fields = 0usize;
    let lines = CleanSet::new(raw)
        .apply(|raw| normalize_line(raw, &mut coerced_fields))
        .apply(first_occurrence(
            NormalizedLine::clone,
            RejectReason::DuplicateLine,
        ))
        .apply(require_date)
        .apply(|dated| resolve_references(dated, customers, products));
    if coerced_fields > 0 {
        warn!(
            coerced_fields,
            "coerced missing or unparseable quantity/unit_price values to zero"
        );
    }
    debug!(
        read = lines.read,
        kept = lines.emitted(),
        rejected = lines.rejected(),
        "transactions reconciled"
    );
    Reconciled {
        lines,
        coerced_fields,
    }
}
