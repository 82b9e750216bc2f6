//! ETL run with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: locate and read the three extracts
//! 2. **Transform**: clean, reconcile and aggregate
//! 3. **Load**: reset the schema and insert everything in one transaction
//! 4. **Report**: write the data quality report
//!
//! A failure in any stage ends the run; nothing is loaded after a failed
//! ingest or transform.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use fleximart_ingest::{RawTables, SourceFiles, locate_sources, read_sources};
use fleximart_load::{LoadBatch, LoadSummary, RecordSink, SqliteStore};
use fleximart_report::{LoadOutcome, OrderCounts, QualityReport, SourceCounts, StageCounts};
use fleximart_transform::{TransformOutput, fingerprint, transform_tables};

use crate::types::{RecordSetSummary, RunOptions, RunResult};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Locate and read the customer, product and sales extracts.
pub fn ingest(input_dir: &Path, files: &SourceFiles) -> Result<RawTables> {
    let paths = locate_sources(input_dir, files).context("locate source files")?;
    read_sources(&paths).context("read source files")
}

// ============================================================================
// Stage 2: Transform
// ============================================================================

pub fn transform(tables: &RawTables) -> Result<TransformOutput> {
    transform_tables(tables).context("transform sources")
}

// ============================================================================
// Stage 3: Load
// ============================================================================

pub fn load_batch(output: &TransformOutput) -> LoadBatch<'_> {
    LoadBatch {
        customers: &output.customers.records,
        products: &output.products.records,
        orders: &output.orders,
        order_items: &output.order_items,
    }
}

/// Load the transform output into any sink.
pub fn load_into<S: RecordSink>(sink: &mut S, output: &TransformOutput) -> Result<LoadSummary> {
    sink.load(&load_batch(output)).context("load record sets")
}

/// Load the transform output into the SQLite database at `database`.
pub fn load(database: &Path, output: &TransformOutput) -> Result<LoadSummary> {
    let mut store = SqliteStore::open(database)
        .with_context(|| format!("open database {}", database.display()))?;
    load_into(&mut store, output)
}

// ============================================================================
// Stage 4: Report
// ============================================================================

/// Fold the ingest and transform counts into a fresh report.
pub fn build_report(tables: &RawTables, output: &TransformOutput, fingerprint: &str) -> QualityReport {
    let mut report = QualityReport::new();
    report.record_sources(SourceCounts {
        customers: tables.customers.len(),
        products: tables.products.len(),
        sales: tables.sales.len(),
    });
    report.record_customers(StageCounts::of(&output.customers));
    report.record_products(StageCounts::of(&output.products));
    report.record_sales(
        StageCounts::of(&output.transactions),
        output.coerced_numeric_fields,
    );
    report.record_orders(OrderCounts {
        orders: output.orders.len(),
        items: output.order_items.len(),
    });
    report.record_fingerprint(fingerprint);
    report
}

pub fn record_sets(output: &TransformOutput) -> Vec<RecordSetSummary> {
    vec![
        RecordSetSummary {
            name: "Customers",
            read: Some(output.customers.read),
            rejected: Some(output.customers.rejected()),
            emitted: output.customers.emitted(),
        },
        RecordSetSummary {
            name: "Products",
            read: Some(output.products.read),
            rejected: Some(output.products.rejected()),
            emitted: output.products.emitted(),
        },
        RecordSetSummary {
            name: "Transaction lines",
            read: Some(output.transactions.read),
            rejected: Some(output.transactions.rejected()),
            emitted: output.transactions.emitted(),
        },
        RecordSetSummary {
            name: "Orders",
            read: None,
            rejected: None,
            emitted: output.orders.len(),
        },
        RecordSetSummary {
            name: "Order items",
            read: None,
            rejected: None,
            emitted: output.order_items.len(),
        },
    ]
}

// ============================================================================
// Full run
// ============================================================================

/// Run every stage for one input directory.
pub fn run(options: &RunOptions) -> Result<RunResult> {
    let run_span = info_span!(
        "run",
        input_dir = %options.input_dir.display(),
        dry_run = options.dry_run
    );
    let _run_guard = run_span.enter();

    let ingest_start = Instant::now();
    let tables = info_span!("ingest").in_scope(|| ingest(&options.input_dir, &options.files))?;
    info!(
        customers = tables.customers.len(),
        products = tables.products.len(),
        sales = tables.sales.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let transform_start = Instant::now();
    let output = info_span!("transform").in_scope(|| transform(&tables))?;
    let fingerprint = fingerprint(&output).context("fingerprint transform output")?;
    info!(
        customers = output.customers.emitted(),
        products = output.products.emitted(),
        lines = output.transactions.emitted(),
        orders = output.orders.len(),
        fingerprint = %fingerprint,
        duration_ms = transform_start.elapsed().as_millis(),
        "transform complete"
    );

    let mut report = build_report(&tables, &output, &fingerprint);

    let load_summary = if options.dry_run {
        info!("dry run, skipping database load");
        report.record_load(LoadOutcome::SkippedDryRun);
        None
    } else {
        let load_start = Instant::now();
        let summary = info_span!("load").in_scope(|| load(&options.database, &output))?;
        info!(
            database = %options.database.display(),
            order_items = summary.order_items,
            duration_ms = load_start.elapsed().as_millis(),
            "load complete"
        );
        report.record_load(LoadOutcome::Success);
        Some(summary)
    };

    let report_start = Instant::now();
    info_span!("report").in_scope(|| {
        report
            .write_report(&options.report)
            .context("write quality report")
    })?;
    info!(
        path = %options.report.display(),
        duration_ms = report_start.elapsed().as_millis(),
        "report complete"
    );

    Ok(RunResult {
        input_dir: options.input_dir.clone(),
        report_path: options.report.clone(),
        database: (!options.dry_run).then(|| options.database.clone()),
        record_sets: record_sets(&output),
        fingerprint,
        load: load_summary,
        report,
    })
}
