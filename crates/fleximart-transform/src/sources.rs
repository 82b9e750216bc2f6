//! Binding source tables to typed raw records.
//!
//! Column names are matched case-insensitively. Absent optional columns read
//! as null on every row; only the sales quantity and unit price columns are
//! structurally required.

use tracing::debug;

use fleximart_ingest::{RawTables, SourceTable};
use fleximart_model::{RawCustomer, RawProduct, RawTransactionLine};

use crate::error::{Result, TransformError};

pub mod columns {
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const CITY: &str = "city";
    pub const REGISTRATION_DATE: &str = "registration_date";

    pub const PRODUCT_ID: &str = "product_id";
    pub const PRODUCT_NAME: &str = "product_name";
    pub const CATEGORY: &str = "category";
    pub const PRICE: &str = "price";
    pub const STOCK_QUANTITY: &str = "stock_quantity";

    pub const TRANSACTION_ID: &str = "transaction_id";
    pub const QUANTITY: &str = "quantity";
    pub const UNIT_PRICE: &str = "unit_price";
    pub const TRANSACTION_DATE: &str = "transaction_date";
}

/// Typed raw records for all three extracts, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSources {
    pub customers: Vec<RawCustomer>,
    pub products: Vec<RawProduct>,
    pub sales: Vec<RawTransactionLine>,
}

impl RawSources {
    pub fn from_tables(tables: &RawTables) -> Result<Self> {
        Ok(Self {
            customers: raw_customers(&tables.customers),
            products: raw_products(&tables.products),
            sales: raw_transaction_lines(&tables.sales)?,
        })
    }
}

pub fn raw_customers(table: &SourceTable) -> Vec<RawCustomer> {
    table
        .records()
        .map(|record| RawCustomer {
            customer_id: record.get_owned(columns::CUSTOMER_ID),
            first_name: record.get_owned(columns::FIRST_NAME),
            last_name: record.get_owned(columns::LAST_NAME),
            email: record.get_owned(columns::EMAIL),
            phone: record.get_owned(columns::PHONE),
            city: record.get_owned(columns::CITY),
            registration_date: record.get_owned(columns::REGISTRATION_DATE),
        })
        .collect()
}

pub fn raw_products(table: &SourceTable) -> Vec<RawProduct> {
    table
        .records()
        .map(|record| RawProduct {
            product_id: record.get_owned(columns::PRODUCT_ID),
            product_name: record.get_owned(columns::PRODUCT_NAME),
            category: record.get_owned(columns::CATEGORY),
            price: record.get_owned(columns::PRICE),
            stock_quantity: record.get_owned(columns::STOCK_QUANTITY),
        })
        .collect()
}

/// Bind the sales extract.
///
/// # Errors
///
/// Returns [`TransformError::MissingColumns`] when the quantity or unit price
/// column is absent. Line amounts cannot be derived without both.
pub fn raw_transaction_lines(table: &SourceTable) -> Result<Vec<RawTransactionLine>> {
    let missing: Vec<String> = [columns::QUANTITY, columns::UNIT_PRICE]
        .into_iter()
        .filter(|name| !table.has_column(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(TransformError::MissingColumns {
            source_name: "sales",
            columns: missing,
        });
    }
    let lines: Vec<RawTransactionLine> = table
        .records()
        .map(|record| RawTransactionLine {
            transaction_id: record.get_owned(columns::TRANSACTION_ID),
            customer_id: record.get_owned(columns::CUSTOMER_ID),
            product_id: record.get_owned(columns::PRODUCT_ID),
            quantity: record.get_owned(columns::QUANTITY),
            unit_price: record.get_owned(columns::UNIT_PRICE),
            transaction_date: record.get_owned(columns::TRANSACTION_DATE),
        })
        .collect();
    debug!(rows = lines.len(), "bound sales lines");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleximart_ingest::read_source_table_from_reader;

    fn table(contents: &str) -> SourceTable {
        read_source_table_from_reader(contents.as_bytes())
            .expect("parse")
            .expect("header")
    }

    #[test]
    fn missing_both_amount_columns_is_fatal() {
        let sales = table("transaction_id,customer_id,product_id\nT1,C1,P1\n");
        let err = raw_transaction_lines(&sales).unwrap_err();
        assert_eq!(
            err.to_string(),
            "sales source is missing required column(s): quantity, unit_price"
        );
    }

    #[test]
    fn missing_one_amount_column_is_fatal() {
        let sales = table("transaction_id,quantity\nT1,2\n");
        let err = raw_transaction_lines(&sales).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingColumns { ref columns, .. } if columns == &["unit_price"]
        ));
    }

    #[test]
    fn binds_columns_case_insensitively() {
        let customers = table("Customer_ID,EMAIL\nC7,a@b.c\n");
        let raw = raw_customers(&customers);
        assert_eq!(raw[0].customer_id.as_deref(), Some("C7"));
        assert_eq!(raw[0].email.as_deref(), Some("a@b.c"));
        assert_eq!(raw[0].phone, None);
    }
}
