//! Order-preserving CSV tables with case-insensitive column lookup.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// A delimited source read fully into memory, rows in file order.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    lookup: HashMap<String, usize>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut lookup = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            // First header wins when a name repeats.
            lookup.entry(header.to_ascii_uppercase()).or_insert(idx);
        }
        Self {
            headers,
            rows,
            lookup,
        }
    }

    /// Index of a column, matched case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.lookup.get(&name.to_ascii_uppercase()).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = SourceRecord<'_>> + '_ {
        self.rows.iter().map(move |cells| SourceRecord {
            table: self,
            cells,
        })
    }
}

/// A borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct SourceRecord<'a> {
    table: &'a SourceTable,
    cells: &'a [String],
}

impl<'a> SourceRecord<'a> {
    /// Cell text, or `None` when the column is absent or the cell is blank.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column(column)?;
        let value = self.cells.get(idx)?.as_str();
        if value.is_empty() { None } else { Some(value) }
    }

    /// Owned variant of [`SourceRecord::get`].
    pub fn get_owned(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_string)
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV whose first non-blank record is the header row.
pub fn read_source_table(path: &Path) -> Result<SourceTable> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_source_table_from_reader(file).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })?;
    match table {
        Some(table) => {
            debug!(
                path = %path.display(),
                columns = table.headers.len(),
                rows = table.len(),
                "read source table"
            );
            Ok(table)
        }
        None => Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        }),
    }
}

fn is_blank_line(record: &csv::StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}

/// Parse CSV from any reader. Returns `None` when there is no header row.
pub fn read_source_table_from_reader<R: Read>(
    reader: R,
) -> std::result::Result<Option<SourceTable>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    // Delimiter-only lines stay: they are all-null rows, not blank lines.
    let mut records = reader
        .records()
        .filter(|record| !matches!(record, Ok(r) if is_blank_line(r)));
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(normalize_header).collect(),
        None => return Ok(None),
    };
    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).map(normalize_cell).unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(Some(SourceTable::new(headers, rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> SourceTable {
        read_source_table_from_reader(contents.as_bytes())
            .expect("parse csv")
            .expect("header row")
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let table = parse("Customer_ID, Email \nC001,a@x.com\n");
        assert_eq!(table.headers, vec!["Customer_ID", "Email"]);
        assert_eq!(table.column("customer_id"), Some(0));
        assert_eq!(table.column("EMAIL"), Some(1));
        assert!(!table.has_column("phone"));
    }

    #[test]
    fn blank_cells_and_missing_columns_read_as_none() {
        let table = parse("id,email,phone\nC1,,555\nC2\n");
        let records: Vec<_> = table.records().collect();
        assert_eq!(records[0].get("id"), Some("C1"));
        assert_eq!(records[0].get("email"), None);
        assert_eq!(records[1].get("phone"), None);
        assert_eq!(records[0].get("city"), None);
    }

    #[test]
    fn skips_blank_lines_and_strips_bom() {
        let table = parse("\u{feff}id,name\n\n1, Widget \n   \n2,Gadget\n");
        assert_eq!(table.headers, vec!["id", "name"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "Widget"]);
    }

    #[test]
    fn delimiter_only_rows_are_kept_as_null_rows() {
        let table = parse("id,name,email\n1,Widget,a@x.com\n,,\n2,Gadget,b@x.com\n");
        assert_eq!(table.len(), 3);
        let records: Vec<_> = table.records().collect();
        assert_eq!(records[1].get("id"), None);
        assert_eq!(records[1].get("email"), None);
        assert_eq!(records[2].get("id"), Some("2"));
    }

    #[test]
    fn empty_input_has_no_table() {
        let table = read_source_table_from_reader("".as_bytes()).expect("parse csv");
        assert!(table.is_none());
    }
}
