//! Entity cleaners.
//!
//! Each cleaner is a fixed chain of stages over a [`CleanSet`]. Identifier
//! normalization and validity filtering always come before deduplication, so
//! two rows whose raw ids differ textually but share a digit sequence are
//! duplicates.
//!
//! [`CleanSet`]: fleximart_model::CleanSet

pub mod customers;
pub mod products;

pub use customers::clean_customers;
pub use products::clean_products;

use fleximart_model::{RejectReason, RowOutcome};
use tracing::trace;

use crate::normalization::normalize_identifier;

/// A raw record paired with its normalized id.
#[derive(Debug, Clone)]
pub(crate) struct Identified<T> {
    pub id: i64,
    pub raw: T,
}

impl<T> Identified<T> {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Attach a normalized id, rejecting records whose id is unrepresentable.
pub(crate) fn identify<T>(raw: T, raw_id: fn(&T) -> Option<&str>) -> RowOutcome<Identified<T>> {
    match raw_id(&raw).and_then(normalize_identifier) {
        Some(id) => RowOutcome::Valid(Identified { id, raw }),
        None => {
            trace!(raw_id = raw_id(&raw).unwrap_or(""), "unrepresentable id");
            RowOutcome::Rejected(RejectReason::UnrepresentableId)
        }
    }
}
