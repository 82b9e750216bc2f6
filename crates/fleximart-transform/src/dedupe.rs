use std::collections::BTreeSet;

use fleximart_model::{RejectReason, RowOutcome};

/// A stage that keeps the first record for each key and rejects the rest.
///
/// Must run over records in input order for "first" to mean first occurrence.
pub fn first_occurrence<T, K, F>(mut key: F, reason: RejectReason) -> impl FnMut(T) -> RowOutcome<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut seen = BTreeSet::new();
    move |record| {
        if seen.insert(key(&record)) {
            RowOutcome::Valid(record)
        } else {
            RowOutcome::Rejected(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleximart_model::CleanSet;

    #[test]
    fn keeps_first_occurrence() {
        let set = CleanSet::new(vec![(1, "a"), (2, "b"), (1, "c"), (3, "d"), (2, "e")])
            .apply(first_occurrence(|row: &(i32, &str)| row.0, RejectReason::DuplicateId));
        assert_eq!(set.records, vec![(1, "a"), (2, "b"), (3, "d")]);
        assert_eq!(set.rejections.count(RejectReason::DuplicateId), 2);
    }
}
