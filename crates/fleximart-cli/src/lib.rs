//! CLI library components for the FlexiMart ETL runner.

pub mod logging;
pub mod pipeline;
pub mod types;
