//! Reference table loading.
//!
//! The reference table is a CSV export of the HSN master sheet. Only two
//! columns matter:
//!
//! - the **code column**: the first header containing the code hint
//!   (`HSNCode` by default, matched case-insensitively as a substring, so
//!   `HSNCode `, `HSNCode (8 digit)` and `hsncode` all qualify)
//! - the **description column**: the header equal to `Description`
//!   (case-insensitive, after trimming)
//!
//! Every other column is ignored. Rows with a blank code are skipped here;
//! structural checks on the code are left to the index builder. Cells that
//! are not valid UTF-8 (Latin-1 spreadsheet exports) are decoded lossily
//! rather than failing the load; only a malformed header or a broken CSV
//! stream is fatal.

use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Serialize;
use tracing::{debug, info, warn};

use hsn_model::CodeRecord;

use crate::error::TableError;
use crate::hash::sha256_hex;

/// Column names used to locate the code and description fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct TableLayout {
    /// Substring that identifies the code column header.
    pub code_column: String,
    /// Exact header name of the description column.
    pub description_column: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            code_column: "HSNCode".to_string(),
            description_column: "Description".to_string(),
        }
    }
}

impl TableLayout {
    pub fn new(code_column: impl Into<String>, description_column: impl Into<String>) -> Self {
        Self {
            code_column: code_column.into(),
            description_column: description_column.into(),
        }
    }

    fn code_index(&self, headers: &[String]) -> Option<usize> {
        let hint = self.code_column.trim().to_lowercase();
        headers
            .iter()
            .position(|h| h.to_lowercase().contains(&hint))
    }

    fn description_index(&self, headers: &[String]) -> Option<usize> {
        let name = self.description_column.trim();
        headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }
}

/// Where a loaded table came from.
#[derive(Debug, Clone, Serialize)]
pub struct TableSource {
    /// File path, or `None` for in-memory tables.
    pub path: Option<PathBuf>,
    /// SHA-256 of the raw file bytes.
    pub sha256: Option<String>,
    /// Resolved header of the code column.
    pub code_column: String,
    /// Resolved header of the description column.
    pub description_column: String,
    /// Data rows read from the file.
    pub rows_read: usize,
    /// Rows dropped because the code cell was blank.
    pub rows_skipped: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Records plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub records: Vec<CodeRecord>,
    pub source: TableSource,
}

/// A provider of reference table rows.
///
/// Loading may block (file or network IO); it always completes before the
/// code book is built.
pub trait TableLoader {
    fn load(&self) -> Result<LoadedTable, TableError>;
}

/// Loads the reference table from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvTableLoader {
    path: PathBuf,
    layout: TableLayout,
}

impl CsvTableLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            layout: TableLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableLoader for CsvTableLoader {
    fn load(&self) -> Result<LoadedTable, TableError> {
        let bytes = std::fs::read(&self.path).map_err(|e| TableError::io(&self.path, e))?;
        let sha256 = sha256_hex(&bytes);
        let mut table = read_code_table(bytes.as_slice(), &self.layout, &self.path)?;
        table.source.path = Some(self.path.clone());
        table.source.sha256 = Some(sha256);
        info!(
            path = %self.path.display(),
            records = table.records.len(),
            skipped = table.source.rows_skipped,
            "reference table loaded"
        );
        Ok(table)
    }
}

/// An already materialized table, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    records: Vec<CodeRecord>,
}

impl MemoryTable {
    pub fn new(records: Vec<CodeRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<CodeRecord> for MemoryTable {
    fn from_iter<I: IntoIterator<Item = CodeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TableLoader for MemoryTable {
    fn load(&self) -> Result<LoadedTable, TableError> {
        let layout = TableLayout::default();
        Ok(LoadedTable {
            records: self.records.clone(),
            source: TableSource {
                path: None,
                sha256: None,
                code_column: layout.code_column,
                description_column: layout.description_column,
                rows_read: self.records.len(),
                rows_skipped: 0,
                loaded_at: Utc::now(),
            },
        })
    }
}

/// Parse CSV data into code records.
///
/// `origin` is only used for error messages and logging. Header names are
/// trimmed and stripped of a UTF-8 BOM; cell values are trimmed.
pub fn read_code_table<R: Read>(
    reader: R,
    layout: &TableLayout,
    origin: &Path,
) -> Result<LoadedTable, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| TableError::csv(origin, &e))?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();
    debug!(columns = ?headers, "reference table columns");

    let code_idx = layout
        .code_index(&headers)
        .ok_or_else(|| missing_column(origin, &layout.code_column, &headers))?;
    let desc_idx = layout
        .description_index(&headers)
        .ok_or_else(|| missing_column(origin, &layout.description_column, &headers))?;
    debug!(
        code_column = %headers[code_idx],
        description_column = %headers[desc_idx],
        "resolved reference table columns"
    );

    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_skipped = 0usize;
    let mut rows_lossy = 0usize;
    for row in reader.byte_records() {
        let row = row.map_err(|e| TableError::csv(origin, &e))?;
        rows_read += 1;
        let code = decode_cell(row.get(code_idx));
        let description = decode_cell(row.get(desc_idx));
        if matches!(code, Cow::Owned(_)) || matches!(description, Cow::Owned(_)) {
            rows_lossy += 1;
            debug!(
                line = row.position().map(csv::Position::line),
                "replaced invalid UTF-8 in reference row"
            );
        }
        let code = code.trim();
        if code.is_empty() {
            rows_skipped += 1;
            continue;
        }
        records.push(CodeRecord::new(code, description.trim()));
    }
    if rows_skipped > 0 {
        warn!(
            path = %origin.display(),
            rows_skipped,
            "skipped reference rows with a blank code"
        );
    }
    if rows_lossy > 0 {
        warn!(
            path = %origin.display(),
            rows_lossy,
            "reference rows contained invalid UTF-8; replaced with U+FFFD"
        );
    }

    Ok(LoadedTable {
        records,
        source: TableSource {
            path: None,
            sha256: None,
            code_column: headers[code_idx].clone(),
            description_column: headers[desc_idx].clone(),
            rows_read,
            rows_skipped,
            loaded_at: Utc::now(),
        },
    })
}

/// Decode a raw cell, replacing invalid UTF-8 sequences. Borrowed when the
/// cell was already valid.
fn decode_cell(cell: Option<&[u8]>) -> Cow<'_, str> {
    cell.map_or(Cow::Borrowed(""), String::from_utf8_lossy)
}

fn missing_column(origin: &Path, column: &str, headers: &[String]) -> TableError {
    TableError::MissingColumn {
        path: origin.to_path_buf(),
        column: column.to_string(),
        found: headers.join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Result<LoadedTable, TableError> {
        read_code_table(data.as_bytes(), &TableLayout::default(), Path::new("test.csv"))
    }

    #[test]
    fn detects_code_column_by_substring() {
        let table = parse("Sl No,HSNCode (8 digit),Description\n1,0101,Live horses\n").unwrap();
        assert_eq!(table.source.code_column, "HSNCode (8 digit)");
        assert_eq!(table.records, vec![CodeRecord::new("0101", "Live horses")]);
    }

    #[test]
    fn trims_headers_bom_and_values() {
        let table = parse("\u{feff} HSNCode , Description \n  0101 ,  Live horses  \n").unwrap();
        assert_eq!(table.source.code_column, "HSNCode");
        assert_eq!(table.source.description_column, "Description");
        assert_eq!(table.records[0], CodeRecord::new("0101", "Live horses"));
    }

    #[test]
    fn skips_blank_codes() {
        let table = parse("HSNCode,Description\n,Orphan\n01,Live animals\n   ,Blank\n").unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.source.rows_read, 3);
        assert_eq!(table.source.rows_skipped, 2);
    }

    #[test]
    fn keeps_blank_descriptions() {
        let table = parse("HSNCode,Description\n01,\n").unwrap();
        assert_eq!(table.records, vec![CodeRecord::new("01", "")]);
    }

    #[test]
    fn invalid_utf8_cell_does_not_abort_load() {
        let data = b"HSNCode,Description\n01,Live animals\n0101,Caf\xE9 horses\n010110,Pure-bred breeding horses\n";
        let table =
            read_code_table(&data[..], &TableLayout::default(), Path::new("latin1.csv")).unwrap();
        assert_eq!(table.records.len(), 3);
        assert_eq!(table.records[0], CodeRecord::new("01", "Live animals"));
        assert_eq!(table.records[1], CodeRecord::new("0101", "Caf\u{fffd} horses"));
        assert_eq!(table.records[2].code, "010110");
        assert_eq!(table.source.rows_skipped, 0);
    }

    #[test]
    fn invalid_utf8_header_is_a_csv_error() {
        let data = b"HSNCode,Descripti\xF3n\n01,Live animals\n";
        let err = read_code_table(&data[..], &TableLayout::default(), Path::new("bad.csv"))
            .unwrap_err();
        match err {
            TableError::Csv { path, line, .. } => {
                assert_eq!(path, Path::new("bad.csv"));
                assert_eq!(line, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_description_column_is_fatal() {
        let err = parse("HSNCode,Desc\n01,Live animals\n").unwrap_err();
        match err {
            TableError::MissingColumn { column, found, .. } => {
                assert_eq!(column, "Description");
                assert_eq!(found, "HSNCode, Desc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_code_column_is_fatal() {
        let err = parse("Code,Description\n01,Live animals\n").unwrap_err();
        assert!(matches!(err, TableError::MissingColumn { .. }));
    }

    #[test]
    fn custom_layout() {
        let layout = TableLayout::new("sac", "Service");
        let table = read_code_table(
            "SACCode,Service\n9954,Construction services\n".as_bytes(),
            &layout,
            Path::new("sac.csv"),
        )
        .unwrap();
        assert_eq!(table.records[0].description, "Construction services");
    }

    #[test]
    fn memory_table_loads_as_is() {
        let table: MemoryTable = vec![CodeRecord::new("01", "Live animals")]
            .into_iter()
            .collect();
        let loaded = table.load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert!(loaded.source.path.is_none());
    }
}
