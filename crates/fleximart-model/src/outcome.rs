//! Per-row outcomes and the record-set wrapper that tallies rejections.
//!
//! Expected per-row defects are data, not errors: a stage maps each record to
//! a [`RowOutcome`], and [`CleanSet::apply`] keeps the survivors in their
//! original order while counting every rejection by reason.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a row was excluded from its output set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnrepresentableId,
    DuplicateId,
    MissingEmail,
    DuplicateEmail,
    InvalidPrice,
    AmountOverflow,
    DuplicateLine,
    UnparseableDate,
    UnrepresentableOrderId,
    UnknownCustomer,
    UnknownProduct,
    OrderTotalOverflow,
}

impl RejectReason {
    pub fn label(self) -> &'static str {
        match self {
            RejectReason::UnrepresentableId => "unrepresentable id",
            RejectReason::DuplicateId => "duplicate id",
            RejectReason::MissingEmail => "missing email",
            RejectReason::DuplicateEmail => "duplicate email",
            RejectReason::InvalidPrice => "invalid price",
            RejectReason::AmountOverflow => "amount overflow",
            RejectReason::DuplicateLine => "duplicate line",
            RejectReason::UnparseableDate => "unparseable date",
            RejectReason::UnrepresentableOrderId => "unrepresentable order id",
            RejectReason::UnknownCustomer => "unknown customer",
            RejectReason::UnknownProduct => "unknown product",
            RejectReason::OrderTotalOverflow => "order total overflow",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of running one stage over one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome<T> {
    Valid(T),
    Rejected(RejectReason),
}

/// Rejection counts keyed by reason, iterated in reason order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionTally {
    counts: BTreeMap<RejectReason, usize>,
}

impl RejectionTally {
    pub fn record(&mut self, reason: RejectReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    pub fn count(&self, reason: RejectReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (RejectReason, usize)> + '_ {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(reason, count)| (*reason, *count))
    }
}

/// An ordered record set together with how many rows went in and why the
/// missing ones were dropped.
///
/// `read == records.len() + rejections.total()` holds for every set built
/// through [`CleanSet::new`] and [`CleanSet::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanSet<T> {
    pub records: Vec<T>,
    pub read: usize,
    pub rejections: RejectionTally,
}

impl<T> CleanSet<T> {
    /// Wrap freshly read rows; nothing is rejected yet.
    pub fn new(records: Vec<T>) -> Self {
        Self {
            read: records.len(),
            records,
            rejections: RejectionTally::default(),
        }
    }

    /// Run one stage over every surviving row, preserving input order.
    pub fn apply<U, F>(self, mut stage: F) -> CleanSet<U>
    where
        F: FnMut(T) -> RowOutcome<U>,
    {
        let CleanSet {
            records,
            read,
            mut rejections,
        } = self;
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            match stage(record) {
                RowOutcome::Valid(value) => kept.push(value),
                RowOutcome::Rejected(reason) => rejections.record(reason),
            }
        }
        CleanSet {
            records: kept,
            read,
            rejections,
        }
    }

    /// Infallible per-row rewrite.
    pub fn map<U, F>(self, mut f: F) -> CleanSet<U>
    where
        F: FnMut(T) -> U,
    {
        self.apply(|record| RowOutcome::Valid(f(record)))
    }

    pub fn emitted(&self) -> usize {
        self.records.len()
    }

    pub fn rejected(&self) -> usize {
        self.rejections.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_order_and_counts_rejections() {
        let set = CleanSet::new(vec![1, 2, 3, 4, 5]).apply(|n| {
            if n % 2 == 0 {
                RowOutcome::Rejected(RejectReason::DuplicateId)
            } else {
                RowOutcome::Valid(n * 10)
            }
        });
        assert_eq!(set.records, vec![10, 30, 50]);
        assert_eq!(set.read, 5);
        assert_eq!(set.rejected(), 2);
        assert_eq!(set.rejections.count(RejectReason::DuplicateId), 2);
        assert_eq!(set.read, set.emitted() + set.rejected());
    }

    #[test]
    fn tally_iterates_in_reason_order() {
        let mut tally = RejectionTally::default();
        tally.record(RejectReason::UnknownProduct);
        tally.record(RejectReason::UnrepresentableId);
        tally.record(RejectReason::UnknownProduct);
        let entries: Vec<_> = tally.iter().collect();
        assert_eq!(
            entries,
            vec![
                (RejectReason::UnrepresentableId, 1),
                (RejectReason::UnknownProduct, 2)
            ]
        );
    }
}
