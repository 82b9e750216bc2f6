//! Customer cleaning.

use tracing::{debug, debug_span, trace};

use fleximart_model::{CleanSet, Customer, RawCustomer, RejectReason, RowOutcome};

use crate::clean::{Identified, identify};
use crate::dedupe::first_occurrence;
use crate::normalization::{normalize_phone, parse_day_first_date};

/// A customer row that has passed the email check.
struct Contactable {
    id: i64,
    email: String,
    raw: RawCustomer,
}

fn raw_customer_id(raw: &RawCustomer) -> Option<&str> {
    raw.customer_id.as_deref()
}

fn require_email(row: Identified<RawCustomer>) -> RowOutcome<Contactable> {
    let Identified { id, mut raw } = row;
    match raw.email.take() {
        Some(email) => RowOutcome::Valid(Contactable { id, email, raw }),
        None => {
            trace!(customer_id = id, "customer without email");
            RowOutcome::Rejected(RejectReason::MissingEmail)
        }
    }
}

fn finish(row: Contactable) -> Customer {
    let Contactable { id, email, raw } = row;
    Customer {
        customer_id: id,
        first_name: raw.first_name,
        last_name: raw.last_name,
        email,
        phone: raw.phone.as_deref().and_then(normalize_phone),
        city: raw.city,
        registration_date: raw.registration_date.as_deref().and_then(parse_day_first_date),
    }
}

/// Clean raw customers.
///
/// Stages, in order: normalize the id and drop unrepresentable ids, keep the
/// first row per id, drop rows without an email, drop rows repeating an
/// already kept email, then normalize phone and registration date. Phone and
/// date failures null the field rather than dropping the row.
pub fn clean_customers(raw: Vec<RawCustomer>) -> CleanSet<Customer> {
    let _span = debug_span!("clean_customers", rows = raw.len()).entered();
    let set = CleanSet::new(raw)
        .apply(|row| identify(row, raw_customer_id))
        .apply(first_occurrence(Identified::id, RejectReason::DuplicateId))
        .apply(require_email)
        .apply(first_occurrence(
            |row: &Contactable| row.email.clone(),
            RejectReason::DuplicateEmail,
        ))
        .map(finish);
    debug!(
        read = set.read,
        kept = set.emitted(),
        rejected = set.rejected(),
        "customers cleaned"
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(id: &str, email: Option<&str>) -> RawCustomer {
        RawCustomer {
            customer_id: Some(id.to_string()),
            first_name: Some("Asha".to_string()),
            last_name: Some("Rao".to_string()),
            email: email.map(str::to_string),
            ..RawCustomer::default()
        }
    }

    #[test]
    fn customer_without_email_is_rejected() {
        let set = clean_customers(vec![raw("C9", None)]);
        assert!(set.records.is_empty());
        assert_eq!(set.rejected(), 1);
        assert_eq!(set.rejections.count(RejectReason::MissingEmail), 1);
    }

    #[test]
    fn textually_different_ids_with_same_digits_are_duplicates() {
        let set = clean_customers(vec![
            raw("C007", Some("first@example.com")),
            raw("Cust-007", Some("second@example.com")),
        ]);
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].customer_id, 7);
        assert_eq!(set.records[0].email, "first@example.com");
        assert_eq!(set.rejections.count(RejectReason::DuplicateId), 1);
    }

    #[test]
    fn dedupe_runs_before_email_check() {
        // The first occurrence wins even though it lacks an email.
        let set = clean_customers(vec![raw("C1", None), raw("C1", Some("a@example.com"))]);
        assert!(set.records.is_empty());
        assert_eq!(set.rejections.count(RejectReason::DuplicateId), 1);
        assert_eq!(set.rejections.count(RejectReason::MissingEmail), 1);
    }

    #[test]
    fn repeated_email_is_rejected() {
        let set = clean_customers(vec![
            raw("C1", Some("same@example.com")),
            raw("C2", Some("same@example.com")),
        ]);
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.rejections.count(RejectReason::DuplicateEmail), 1);
    }

    #[test]
    fn phone_and_date_are_normalized_not_rejected() {
        let mut row = raw("C3", Some("c@example.com"));
        row.phone = Some("98765 43210".to_string());
        row.registration_date = Some("03/04/2024".to_string());
        let mut bad = raw("C4", Some("d@example.com"));
        bad.phone = Some("123".to_string());
        bad.registration_date = Some("someday".to_string());

        let set = clean_customers(vec![row, bad]);
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].phone.as_deref(), Some("+91-9876543210"));
        assert_eq!(
            set.records[0].registration_date,
            NaiveDate::from_ymd_opt(2024, 4, 3)
        );
        assert_eq!(set.records[1].phone, None);
        assert_eq!(set.records[1].registration_date, None);
    }
}
