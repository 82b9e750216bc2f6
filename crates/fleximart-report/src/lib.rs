//! FlexiMart data quality report.
//!
//! [`QualityReport`] accumulates per-stage counts as the run progresses and
//! renders them as ordered, human-readable lines. It makes no decisions and
//! only fails when the rendered lines cannot be written.

mod error;
mod quality;

pub use error::{ReportError, Result};
pub use quality::{LoadOutcome, OrderCounts, QualityReport, SourceCounts, StageCounts};
