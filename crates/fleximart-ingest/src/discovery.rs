//! Locating the three raw extracts inside an input directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::table::{SourceTable, read_source_table};

pub const DEFAULT_CUSTOMERS_FILE: &str = "customers_raw.csv";
pub const DEFAULT_PRODUCTS_FILE: &str = "products_raw.csv";
pub const DEFAULT_SALES_FILE: &str = "sales_raw.csv";

/// File names of the three extracts, relative to the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub customers: String,
    pub products: String,
    pub sales: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            customers: DEFAULT_CUSTOMERS_FILE.to_string(),
            products: DEFAULT_PRODUCTS_FILE.to_string(),
            sales: DEFAULT_SALES_FILE.to_string(),
        }
    }
}

/// Resolved, existing paths of the three extracts.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub customers: PathBuf,
    pub products: PathBuf,
    pub sales: PathBuf,
}

/// The three extracts read into memory.
#[derive(Debug, Clone)]
pub struct RawTables {
    pub customers: SourceTable,
    pub products: SourceTable,
    pub sales: SourceTable,
}

/// Resolve the source files, failing on the first one that does not exist.
pub fn locate_sources(dir: &Path, files: &SourceFiles) -> Result<SourcePaths> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    Ok(SourcePaths {
        customers: require_file(dir, &files.customers, "customers")?,
        products: require_file(dir, &files.products, "products")?,
        sales: require_file(dir, &files.sales, "sales")?,
    })
}

fn require_file(dir: &Path, name: &str, source_name: &'static str) -> Result<PathBuf> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(IngestError::FileNotFound { source_name, path });
    }
    debug!(source = source_name, path = %path.display(), "located source");
    Ok(path)
}

/// Read all three located sources.
pub fn read_sources(paths: &SourcePaths) -> Result<RawTables> {
    Ok(RawTables {
        customers: read_source_table(&paths.customers)?,
        products: read_source_table(&paths.products)?,
        sales: read_source_table(&paths.sales)?,
    })
}
