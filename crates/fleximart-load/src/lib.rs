//! FlexiMart load collaborator.
//!
//! Resets the relational schema and writes the four clean record sets in
//! dependency order (customers, products, orders, order items) inside a
//! single transaction.

mod error;
pub mod schema;
mod store;

pub use error::{LoadError, Result};
pub use schema::{ColumnSchema, ForeignKey, SCHEMA_TABLES, TableSchema};
pub use store::{LoadBatch, LoadSummary, RecordSink, SqliteStore};
