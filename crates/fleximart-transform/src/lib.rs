//! FlexiMart transform stage.
//!
//! This crate turns the three raw extracts into load-ready record sets:
//!
//! - **normalization**: identifier, phone, date, numeric and text normalizers
//! - **sources**: binding source tables to typed raw records
//! - **clean**: customer and product cleaners
//! - **reconcile**: sales line cleaning and foreign-key filtering
//! - **aggregate**: order and order-item derivation
//! - **pipeline**: the end-to-end `transform` and output fingerprint

pub mod aggregate;
pub mod clean;
pub mod dedupe;
pub mod error;
pub mod normalization;
pub mod pipeline;
pub mod reconcile;
pub mod sources;

pub use aggregate::{OrderSet, aggregate_orders};
pub use clean::{clean_customers, clean_products};
pub use error::{Result, TransformError};
pub use pipeline::{TransformOutput, fingerprint, transform, transform_tables};
pub use reconcile::{IdSet, Reconciled, reconcile_transactions};
pub use sources::{RawSources, raw_customers, raw_products, raw_transaction_lines};
