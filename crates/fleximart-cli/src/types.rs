use std::path::PathBuf;

use fleximart_ingest::SourceFiles;
use fleximart_load::LoadSummary;
use fleximart_report::QualityReport;

/// Everything one `run` needs to know.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub files: SourceFiles,
    pub database: PathBuf,
    pub report: PathBuf,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct RunResult {
    pub input_dir: PathBuf,
    pub report_path: PathBuf,
    /// `None` on a dry run.
    pub database: Option<PathBuf>,
    pub record_sets: Vec<RecordSetSummary>,
    pub fingerprint: String,
    pub load: Option<LoadSummary>,
    pub report: QualityReport,
}

/// One row of the end-of-run summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSetSummary {
    pub name: &'static str,
    /// `None` for derived sets that have no raw input.
    pub read: Option<usize>,
    pub rejected: Option<usize>,
    pub emitted: usize,
}
