//! Order derivation from reconciled transaction lines.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use fleximart_model::{
    CleanSet, Order, OrderItem, OrderStatus, RejectReason, RowOutcome, TransactionLine,
};

/// Orders and their items, ready for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSet {
    /// The lines that made it into an order. Lines of an order whose total
    /// does not fit in a `Decimal` are rejected as a group.
    pub lines: CleanSet<TransactionLine>,
    /// One order per distinct order id, ascending by id.
    pub orders: Vec<Order>,
    /// One item per kept line, in line order.
    pub items: Vec<OrderItem>,
}

/// Exact per-order sums; `None` once a sum overflows.
fn order_totals(lines: &[TransactionLine]) -> BTreeMap<i64, Option<Decimal>> {
    let mut totals: BTreeMap<i64, Option<Decimal>> = BTreeMap::new();
    for line in lines {
        let total = totals.entry(line.order_id).or_insert(Some(Decimal::ZERO));
        *total = total.and_then(|sum| sum.checked_add(line.amount));
    }
    totals
}

/// Group lines by order id.
///
/// Customer and date come from the first line of each group in input order;
/// the total is the exact sum of the group's amounts. Items are a plain
/// projection of the kept lines, so `items.len() == lines.emitted()`.
pub fn aggregate_orders(lines: CleanSet<TransactionLine>) -> OrderSet {
    let totals = order_totals(&lines.records);
    let lines = lines.apply(|line| match totals.get(&line.order_id) {
        Some(Some(_)) => RowOutcome::Valid(line),
        _ => {
            trace!(order_id = line.order_id, "order total overflows");
            RowOutcome::Rejected(RejectReason::OrderTotalOverflow)
        }
    });

    let mut orders: BTreeMap<i64, Order> = BTreeMap::new();
    for line in &lines.records {
        let total_amount = totals
            .get(&line.order_id)
            .copied()
            .flatten()
            .unwrap_or_default();
        orders.entry(line.order_id).or_insert_with(|| Order {
            order_id: line.order_id,
            customer_id: line.customer_id,
            order_date: line.order_date,
            total_amount,
            status: OrderStatus::Completed,
        });
    }
    let items: Vec<OrderItem> = lines.records.iter().map(OrderItem::from).collect();
    debug!(
        orders = orders.len(),
        items = items.len(),
        rejected = lines.rejections.count(RejectReason::OrderTotalOverflow),
        "orders aggregated"
    );
    OrderSet {
        lines,
        orders: orders.into_values().collect(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn line(order_id: i64, customer_id: i64, day: u32, amount: i64) -> TransactionLine {
        TransactionLine {
            order_id,
            customer_id,
            product_id: 1,
            quantity: Decimal::ONE,
            unit_price: Decimal::from(amount),
            amount: Decimal::from(amount),
            order_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    #[test]
    fn first_line_supplies_customer_and_date() {
        let set = aggregate_orders(CleanSet::new(vec![line(5, 2, 10, 3), line(5, 9, 1, 4)]));
        assert_eq!(set.orders.len(), 1);
        let order = &set.orders[0];
        assert_eq!(order.customer_id, 2);
        assert_eq!(order.order_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(order.total_amount, Decimal::from(7));
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn items_mirror_lines_and_orders_sort_by_id() {
        let lines = vec![line(9, 1, 1, 1), line(3, 1, 1, 2), line(9, 1, 1, 5)];
        let set = aggregate_orders(CleanSet::new(lines));
        assert_eq!(set.items.len(), 3);
        assert_eq!(set.items[0].order_id, 9);
        let ids: Vec<i64> = set.orders.iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    fn overflowing_total_rejects_the_whole_order() {
        let mut big = line(4, 1, 1, 0);
        big.amount = Decimal::MAX;
        let lines = vec![line(2, 1, 1, 5), big.clone(), big, line(4, 1, 1, 1)];
        let set = aggregate_orders(CleanSet::new(lines));
        let ids: Vec<i64> = set.orders.iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(set.items.len(), 1);
        assert_eq!(set.lines.rejections.count(RejectReason::OrderTotalOverflow), 3);
        assert_eq!(set.lines.read, set.lines.emitted() + set.lines.rejected());
    }

    #[test]
    fn no_lines_no_orders() {
        let set = aggregate_orders(CleanSet::new(Vec::new()));
        assert!(set.orders.is_empty());
        assert!(set.items.is_empty());
        assert_eq!(set.lines.read, 0);
    }
}
