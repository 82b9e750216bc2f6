//! FlexiMart extraction collaborator.
//!
//! Finds the customer, product and sales extracts and reads each into a
//! [`SourceTable`]: rows of named raw fields in stable input order.

pub mod discovery;
pub mod error;
pub mod table;

pub use discovery::{
    DEFAULT_CUSTOMERS_FILE, DEFAULT_PRODUCTS_FILE, DEFAULT_SALES_FILE, RawTables, SourceFiles,
    SourcePaths, locate_sources, read_sources,
};
pub use error::{IngestError, Result};
pub use table::{SourceRecord, SourceTable, read_source_table, read_source_table_from_reader};
