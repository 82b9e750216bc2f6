//! Accumulated run metrics and their text rendering.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use fleximart_model::{CleanSet, RejectionTally};

use crate::error::{ReportError, Result};

const TITLE: &str = "--- Data Quality Report ---";

/// Rows read from each raw source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub customers: usize,
    pub products: usize,
    pub sales: usize,
}

/// Read, emitted and rejected counts for one cleaning stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub read: usize,
    pub emitted: usize,
    pub rejections: RejectionTally,
}

impl StageCounts {
    pub fn of<T>(set: &CleanSet<T>) -> Self {
        Self {
            read: set.read,
            emitted: set.emitted(),
            rejections: set.rejections.clone(),
        }
    }

    pub fn rejected(&self) -> usize {
        self.rejections.total()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCounts {
    pub orders: usize,
    pub items: usize,
}

/// How the run ended with respect to the destination store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Success,
    SkippedDryRun,
}

impl LoadOutcome {
    fn line(self) -> &'static str {
        match self {
            Self::Success => "Database Load: Success.",
            Self::SkippedDryRun => "Database Load: Skipped (dry run).",
        }
    }
}

/// Metrics for one run, rendered in a fixed order.
///
/// Sections that were never recorded are left out of the rendering, so a
/// report from an aborted run still lists what was known at that point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityReport {
    sources: Option<SourceCounts>,
    customers: Option<StageCounts>,
    products: Option<StageCounts>,
    sales: Option<StageCounts>,
    coerced_numeric_fields: usize,
    orders: Option<OrderCounts>,
    fingerprint: Option<String>,
    load: Option<LoadOutcome>,
}

impl QualityReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sources(&mut self, counts: SourceCounts) {
        self.sources = Some(counts);
    }

    pub fn record_customers(&mut self, counts: StageCounts) {
        log_breakdown("customers", &counts);
        self.customers = Some(counts);
    }

    pub fn record_products(&mut self, counts: StageCounts) {
        log_breakdown("products", &counts);
        self.products = Some(counts);
    }

    pub fn record_sales(&mut self, counts: StageCounts, coerced_numeric_fields: usize) {
        log_breakdown("sales", &counts);
        self.sales = Some(counts);
        self.coerced_numeric_fields = coerced_numeric_fields;
    }

    pub fn record_orders(&mut self, counts: OrderCounts) {
        self.orders = Some(counts);
    }

    pub fn record_fingerprint(&mut self, fingerprint: impl Into<String>) {
        self.fingerprint = Some(fingerprint.into());
    }

    pub fn record_load(&mut self, outcome: LoadOutcome) {
        self.load = Some(outcome);
    }

    pub fn customers(&self) -> Option<&StageCounts> {
        self.customers.as_ref()
    }

    pub fn products(&self) -> Option<&StageCounts> {
        self.products.as_ref()
    }

    pub fn sales(&self) -> Option<&StageCounts> {
        self.sales.as_ref()
    }

    pub fn load(&self) -> Option<LoadOutcome> {
        self.load
    }

    /// Render the report, one metric per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![TITLE.to_string()];
        if let Some(sources) = self.sources {
            lines.push(format!(
                "Files Read: Customers({}), Products({}), Sales({})",
                sources.customers, sources.products, sources.sales
            ));
        }
        if let Some(customers) = &self.customers {
            lines.push(format!(
                "Customers: Removed {} duplicates/invalid rows ({} valid customers).",
                customers.rejected(),
                customers.emitted
            ));
            push_breakdown(&mut lines, &customers.rejections);
        }
        if let Some(products) = &self.products {
            lines.push(format!(
                "Products: Removed {} duplicates/invalid rows ({} valid products).",
                products.rejected(),
                products.emitted
            ));
            push_breakdown(&mut lines, &products.rejections);
        }
        if let Some(sales) = &self.sales {
            lines.push(format!(
                "Sales: Removed {} invalid transaction lines ({} valid lines).",
                sales.rejected(),
                sales.emitted
            ));
            push_breakdown(&mut lines, &sales.rejections);
            if self.coerced_numeric_fields > 0 {
                lines.push(format!(
                    "Sales: Coerced {} missing or unparseable quantity/unit_price values to 0.",
                    self.coerced_numeric_fields
                ));
            }
        }
        if let Some(orders) = self.orders {
            lines.push(format!(
                "Sales: Cleaned and split into {} Orders ({} order items).",
                orders.orders, orders.items
            ));
        }
        if let Some(fingerprint) = &self.fingerprint {
            lines.push(format!("Output fingerprint: {fingerprint}"));
        }
        if let Some(load) = self.load {
            lines.push(load.line().to_string());
        }
        lines
    }

    /// Write the rendered lines to `path`, each followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Write`] if the file cannot be created or written.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        let lines = self.lines();
        let write_error = |source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        for line in &lines {
            writeln!(writer, "{line}").map_err(write_error)?;
        }
        writer.flush().map_err(write_error)?;
        info!(path = %path.display(), lines = lines.len(), "quality report written");
        Ok(())
    }
}

fn log_breakdown(stage: &'static str, counts: &StageCounts) {
    for (reason, count) in counts.rejections.iter() {
        debug!(stage, reason = reason.label(), count, "rejections");
    }
}

fn push_breakdown(lines: &mut Vec<String>, rejections: &RejectionTally) {
    lines.extend(
        rejections
            .iter()
            .map(|(reason, count)| format!("  - {}: {count}", reason.label())),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleximart_model::RejectReason;

    #[test]
    fn empty_report_has_only_title() {
        assert_eq!(QualityReport::new().lines(), vec![TITLE.to_string()]);
    }

    #[test]
    fn stage_counts_balance() {
        let mut rejections = RejectionTally::default();
        rejections.record(RejectReason::MissingEmail);
        rejections.record(RejectReason::DuplicateId);
        let counts = StageCounts {
            read: 5,
            emitted: 3,
            rejections,
        };
        assert_eq!(counts.read, counts.emitted + counts.rejected());
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut rejections = RejectionTally::default();
        rejections.record(RejectReason::OrderTotalOverflow);
        let mut report = QualityReport::new();
        report.record_sales(
            StageCounts {
                read: 3,
                emitted: 2,
                rejections,
            },
            0,
        );
        let first = report.lines();
        assert_eq!(first, report.lines());
        assert_eq!(first.last().map(String::as_str), Some("  - order total overflow: 1"));
    }

    #[test]
    fn coerced_line_only_when_nonzero() {
        let mut report = QualityReport::new();
        report.record_sales(StageCounts::default(), 0);
        assert!(!report.lines().iter().any(|l| l.contains("Coerced")));
        report.record_sales(StageCounts::default(), 2);
        assert!(report.lines().iter().any(|l| l.contains("Coerced 2 ")));
    }
}
