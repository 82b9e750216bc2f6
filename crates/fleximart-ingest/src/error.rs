//! Error types for source extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading the raw extracts.
///
/// All of these are fatal for a run: a transform never starts on a partial
/// set of sources.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A required source file is missing.
    #[error("{source_name} source not found: {path}")]
    FileNotFound {
        source_name: &'static str,
        path: PathBuf,
    },

    /// Failed to open or read a source file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited data.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            source_name: "sales",
            path: PathBuf::from("/data/sales_raw.csv"),
        };
        assert_eq!(err.to_string(), "sales source not found: /data/sales_raw.csv");
    }
}
