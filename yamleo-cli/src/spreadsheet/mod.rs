//! Spreadsheet export and import of catalogs.
//!
//! An exported worksheet has one row per flattened leaf. Each dotted path is
//! spread over `Level 1`, `Level 2`, … columns and the leaf text goes into a
//! final `Value` column. Import reverses this, also accepting a single `Key`
//! column holding the dotted path.

use std::collections::HashMap;

use calamine::{Data, Reader, Xlsx, open_workbook};
use camino::Utf8Path;
use rust_xlsxwriter::Workbook;
use tracing::debug;
use yamleo::{ArrayPolicy, FlattenedMap, PATH_SEPARATOR, Tree, flatten};

use crate::error::{Result, YamleoError};

/// Name of the single worksheet written on export.
pub const SHEET_NAME: &str = "Translations";

/// Header of the column holding leaf values.
pub const VALUE_HEADER: &str = "Value";

/// Header of the optional column holding a whole dotted path.
pub const KEY_HEADER: &str = "Key";

/// Returns the header of the 1-based path `level` column.
#[must_use]
pub fn level_header(level: usize) -> String {
    format!("Level {level}")
}

/// A leaf ready to be written as a worksheet row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRow {
    /// Path segments, one per level column.
    pub segments: Vec<String>,
    /// Stringified leaf value.
    pub value: String,
}

/// Flattens `tree` into worksheet rows in walk order.
#[must_use]
pub fn export_rows(tree: &Tree, policy: ArrayPolicy) -> Vec<SheetRow> {
    flatten(tree, policy)
        .into_iter()
        .map(|(path, leaf)| SheetRow {
            segments: path.split(PATH_SEPARATOR).map(str::to_owned).collect(),
            value: leaf.to_text(),
        })
        .collect()
}

/// Returns the header row for `rows`: one level column per segment of the
/// deepest path, then [`VALUE_HEADER`].
#[must_use]
pub fn header_for(rows: &[SheetRow]) -> Vec<String> {
    let depth = rows.iter().map(|row| row.segments.len()).max().unwrap_or(0);
    (1..=depth)
        .map(level_header)
        .chain(std::iter::once(VALUE_HEADER.to_owned()))
        .collect()
}

/// Writes `rows` under a header to a new workbook at `path`.
///
/// # Errors
///
/// Returns [`YamleoError::SheetTooLarge`] when the rows exceed worksheet
/// limits and [`YamleoError::SpreadsheetWrite`] when the workbook cannot be
/// written.
pub fn write_workbook(path: &Utf8Path, rows: &[SheetRow]) -> Result<()> {
    let header = header_for(rows);
    let value_column = column_index(header.len().saturating_sub(1))?;
    let write_error = |err| YamleoError::SpreadsheetWrite {
        path: path.to_path_buf(),
        source: Box::new(err),
    };

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(write_error)?;
    for (column, title) in header.iter().enumerate() {
        sheet
            .write_string(0, column_index(column)?, title)
            .map_err(write_error)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let row_number = u32::try_from(index + 1)
            .map_err(|_| YamleoError::SheetTooLarge(format!("{} rows", rows.len())))?;
        for (column, segment) in row.segments.iter().enumerate() {
            sheet
                .write_string(row_number, column_index(column)?, segment)
                .map_err(write_error)?;
        }
        sheet
            .write_string(row_number, value_column, &row.value)
            .map_err(write_error)?;
    }
    workbook.save(path).map_err(write_error)?;
    debug!(path = %path, rows = rows.len(), "wrote workbook");
    Ok(())
}

fn column_index(column: usize) -> Result<u16> {
    u16::try_from(column).map_err(|_| YamleoError::SheetTooLarge(format!("{column} columns")))
}

/// Reads every row of the first worksheet of the workbook at `path`.
///
/// # Errors
///
/// Returns [`YamleoError::EmptyWorkbook`] when the workbook has no worksheet
/// and [`YamleoError::SpreadsheetRead`] when it cannot be opened or parsed.
pub fn read_workbook(path: &Utf8Path) -> Result<Vec<Vec<Data>>> {
    let read_error = |err| YamleoError::SpreadsheetRead {
        path: path.to_path_buf(),
        source: Box::new(err),
    };
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_error)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| YamleoError::EmptyWorkbook(path.to_path_buf()))?;
    let range = workbook.worksheet_range(&sheet).map_err(read_error)?;
    debug!(path = %path, sheet = %sheet, "read worksheet");
    Ok(range.rows().map(<[Data]>::to_vec).collect())
}

/// Converts worksheet rows into dotted-path leaves.
///
/// The first row is the header. For every later row the path is made of the
/// consecutive non-empty level cells, or of the `Key` cell split on dots
/// when no level cell is filled. Rows without a path are skipped. A later row
/// with the same path replaces the value of an earlier one in place.
#[must_use]
pub fn import_rows(rows: &[Vec<Data>]) -> FlattenedMap {
    let mut leaves = FlattenedMap::new();
    let Some((header, body)) = rows.split_first() else {
        return leaves;
    };
    let mut columns = HashMap::new();
    for (index, cell) in header.iter().enumerate() {
        if let Some(title) = cell_text(cell) {
            columns.entry(title.trim().to_owned()).or_insert(index);
        }
    }
    let cell_at = |row: &[Data], title: &str| {
        columns
            .get(title)
            .and_then(|index| row.get(*index))
            .cloned()
    };

    let separator = PATH_SEPARATOR.to_string();
    for row in body {
        let mut segments = Vec::new();
        for level in 1.. {
            let Some(segment) = cell_at(row, &level_header(level)).as_ref().and_then(cell_text)
            else {
                break;
            };
            segments.push(segment);
        }
        if segments.is_empty()
            && let Some(key) = cell_at(row, KEY_HEADER).as_ref().and_then(cell_text)
        {
            segments.extend(key.split(PATH_SEPARATOR).map(str::to_owned));
        }
        if segments.is_empty() {
            continue;
        }
        let value = cell_at(row, VALUE_HEADER).map_or_else(|| Tree::from(""), |cell| cell_value(&cell));
        leaves.insert(segments.join(separator.as_str()), value);
    }
    leaves
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(text) if text.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Converts a cell into a leaf, keeping numbers and booleans typed.
fn cell_value(cell: &Data) -> Tree {
    match cell {
        Data::Empty => Tree::from(""),
        Data::String(text) => Tree::from(text.as_str()),
        Data::Bool(flag) => Tree::from(*flag),
        Data::Int(number) => Tree::from(*number),
        Data::Float(number) => number
            .to_string()
            .parse::<i64>()
            .map_or_else(|_| Tree::from(*number), Tree::from),
        other => Tree::from(other.to_string()),
    }
}
