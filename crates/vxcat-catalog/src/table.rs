//! CSV table model shared by every catalog command.
//!
//! Rows are immutable cell vectors addressed through a [`HeaderIndex`].
//! Parsing and writing go through the `csv` crate so quoted commas, doubled
//! quotes and embedded newlines survive a round trip.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

/// Header names and their column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            // First occurrence wins for duplicated header names.
            positions.entry(name.clone()).or_insert(idx);
        }
        Self { names, positions }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Position of a column that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingColumn`] if the header has no such name.
    pub fn require(&self, name: &str) -> Result<usize, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
    }

    /// Returns the position of `name`, appending the column if absent.
    pub fn ensure(&mut self, name: &str) -> usize {
        if let Some(idx) = self.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.positions.insert(name.to_string(), idx);
        idx
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One data row. Updates return a new row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvRow {
    cells: Vec<String>,
}

impl CsvRow {
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at `idx`, or `""` past the end of the row.
    #[must_use]
    pub fn get(&self, idx: usize) -> &str {
        self.cells.get(idx).map_or("", String::as_str)
    }

    /// Returns this row with cell `idx` replaced, padding with empty cells
    /// when `idx` is past the end.
    #[must_use]
    pub fn with_cell(mut self, idx: usize, value: impl Into<String>) -> Self {
        if idx >= self.cells.len() {
            self.cells.resize(idx + 1, String::new());
        }
        self.cells[idx] = value.into();
        self
    }

    /// Returns this row padded with empty cells up to `len`.
    #[must_use]
    pub fn padded(mut self, len: usize) -> Self {
        if self.cells.len() < len {
            self.cells.resize(len, String::new());
        }
        self
    }

    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A parsed CSV file.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub header: HeaderIndex,
    pub rows: Vec<CsvRow>,
    /// Records whose cell count differed from the header; not in `rows`.
    pub malformed: usize,
}

/// Parses CSV text with a header row.
///
/// Records whose cell count differs from the header are skipped with a
/// warning and counted in [`CsvTable::malformed`]. A leading UTF-8 BOM on
/// the first header name is ignored.
///
/// # Errors
///
/// Returns [`CatalogError::EmptyInput`] when there is no header row and
/// [`CatalogError::Csv`] on invalid UTF-8 or a broken record.
pub fn parse_table(text: &str) -> Result<CsvTable, CatalogError> {
    parse_reader(text.as_bytes())
}

/// Reads and parses a CSV file. See [`parse_table`].
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be opened, otherwise the
/// same errors as [`parse_table`].
pub fn read_table(path: &Path) -> Result<CsvTable, CatalogError> {
    let file = fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_reader(io::BufReader::new(file))
}

fn parse_reader<R: io::Read>(reader: R) -> Result<CsvTable, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let names: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches('\u{feff}').to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    if names.iter().all(String::is_empty) {
        return Err(CatalogError::EmptyInput);
    }

    let width = names.len();
    let mut rows = Vec::new();
    let mut malformed = 0usize;

    for record in reader.records() {
        let record = record?;
        if record.len() != width {
            malformed += 1;
            tracing::warn!(
                line = record.position().map_or(0, csv::Position::line),
                cells = record.len(),
                expected = width,
                "skipping malformed row"
            );
            continue;
        }
        rows.push(CsvRow::new(record.iter().map(str::to_string).collect()));
    }

    Ok(CsvTable {
        header: HeaderIndex::new(names),
        rows,
        malformed,
    })
}

fn write_records<W: io::Write>(
    writer: W,
    header: &HeaderIndex,
    rows: &[CsvRow],
) -> Result<W, CatalogError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(header.names())?;
    let width = header.len();
    for row in rows {
        // Rows shorter than the header are padded so every record has the
        // same width; longer rows are truncated to the header.
        let cells = (0..width).map(|idx| row.get(idx));
        writer.write_record(cells)?;
    }

    writer
        .into_inner()
        .map_err(|e| CatalogError::Csv(e.into_error().into()))
}

/// Serializes a table to CSV text.
///
/// # Errors
///
/// Returns [`CatalogError::Csv`] if a record cannot be encoded.
pub fn write_table_string(header: &HeaderIndex, rows: &[CsvRow]) -> Result<String, CatalogError> {
    let bytes = write_records(Vec::new(), header, rows)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes a table to `path` through a temporary sibling file that is renamed
/// into place, so readers never observe a partially written file.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the temporary file cannot be created or
/// renamed, or [`CatalogError::Csv`] if encoding fails.
pub fn write_table(path: &Path, header: &HeaderIndex, rows: &[CsvRow]) -> Result<(), CatalogError> {
    let tmp = temp_sibling(path);
    let io_err = |source: io::Error| CatalogError::Io {
        path: tmp.display().to_string(),
        source,
    };

    let file = fs::File::create(&tmp).map_err(io_err)?;
    let result = write_records(io::BufWriter::new(file), header, rows).and_then(|buf| {
        buf.into_inner()
            .map_err(|e| io_err(e.into_error()))?
            .sync_all()
            .map_err(io_err)
    });

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        CatalogError::Io {
            path: path.display().to_string(),
            source,
        }
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
