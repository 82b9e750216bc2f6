//! Field normalizers.
//!
//! Pure functions from messy scalar text to canonical values. Every function
//! returns `None` for input it cannot represent instead of failing:
//! - **identifier**: digit-sequence ids and phone numbers
//! - **datetime**: day-first date parsing to ISO 8601
//! - **numeric**: exact decimals and stock counts
//! - **text**: category title-casing

pub mod datetime;
pub mod identifier;
pub mod numeric;
pub mod text;

// Re-export commonly used items
pub use datetime::{format_iso8601_date, normalize_date, parse_day_first_date};
pub use identifier::{normalize_identifier, normalize_phone};
pub use numeric::{
    coerce_stock_quantity, parse_decimal, parse_non_negative_decimal, parse_positive_decimal,
};
pub use text::title_case;
