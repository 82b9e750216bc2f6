//! FlexiMart data model.
//!
//! Raw extract rows, the clean entities derived from them, and the
//! order/order-item records produced by aggregation. Per-row rejection is
//! modelled as data ([`RowOutcome`], [`RejectionTally`]) rather than errors.

pub mod outcome;
pub mod raw;
pub mod records;

pub use outcome::{CleanSet, RejectReason, RejectionTally, RowOutcome};
pub use raw::{RawCustomer, RawProduct, RawTransactionLine};
pub use records::{Customer, Order, OrderItem, OrderStatus, Product, TransactionLine};
