//! JSON Lines files as tables.
//!
//! Every line holding a JSON object becomes a row. Columns are the union of
//! object keys in first-seen order across lines (keys first seen on the same
//! line come in `serde_json`'s sorted map order); rows missing a key get
//! `Null`. Blank lines are skipped silently; lines that are not JSON objects
//! are skipped with a warning and counted.

use super::SourceError;
use crate::model::CellValue;
use crate::view_state::{TableSource, VecTable};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// A loaded table plus how many input lines were rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonlTable {
    /// Parsed rows.
    pub table: VecTable,
    /// Non-blank lines that were not JSON objects.
    pub skipped: usize,
}

/// Load a JSONL file.
///
/// # Errors
/// Returns `SourceError::FileNotFound` or `SourceError::Io`.
pub fn load_table(path: &Path) -> Result<JsonlTable, SourceError> {
    let file = File::open(path).map_err(|e| SourceError::io(path, e))?;
    table_from_reader(BufReader::new(file)).map_err(|e| SourceError::io(path, e))
}

/// Build a table from JSONL read off `reader`.
pub fn table_from_reader<R: BufRead>(reader: R) -> io::Result<JsonlTable> {
    let mut loaded = JsonlTable::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let object = match serde_json::from_str::<serde_json::Value>(&line) {
            Ok(serde_json::Value::Object(object)) => object,
            Ok(_) => {
                warn!(line = line_number, "Skipping JSONL line: not an object");
                loaded.skipped += 1;
                continue;
            }
            Err(e) => {
                warn!(line = line_number, error = %e, "Skipping malformed JSONL line");
                loaded.skipped += 1;
                continue;
            }
        };

        let mut row = vec![CellValue::Null; loaded.table.column_count()];
        for (key, value) in &object {
            let column = match loaded.table.column_index(key) {
                Some(column) => column,
                None => {
                    row.push(CellValue::Null);
                    loaded.table.push_column(key.as_str())
                }
            };
            row[column] = CellValue::from(value);
        }
        loaded.table.push_row(row);
    }
    debug!(
        rows = loaded.table.row_count(),
        columns = loaded.table.column_count(),
        skipped = loaded.skipped,
        "JSONL table loaded"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str) -> JsonlTable {
        table_from_reader(Cursor::new(text.as_bytes().to_vec())).unwrap()
    }

    #[test]
    fn columns_are_union_of_keys_in_first_seen_order() {
        let loaded = load("{\"a\":1,\"b\":\"x\"}\n{\"c\":true,\"a\":2}\n");
        let table = &loaded.table;
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column_name(0), "a");
        assert_eq!(table.column_name(1), "b");
        assert_eq!(table.column_name(2), "c");
        assert_eq!(table.cell(0, 2), CellValue::Null, "backfilled");
        assert_eq!(table.cell(1, 0), CellValue::Number(2.0));
        assert_eq!(table.cell(1, 1), CellValue::Null);
        assert_eq!(table.cell(1, 2), CellValue::Text("true".into()));
    }

    #[test]
    fn malformed_and_non_object_lines_are_counted() {
        let loaded = load("{\"a\":1}\nnot json\n[1,2]\n\n{\"a\":2}\n");
        assert_eq!(loaded.table.row_count(), 2);
        assert_eq!(loaded.skipped, 2);
    }

    #[test]
    fn null_values_stay_null() {
        let loaded = load("{\"a\":null}\n");
        assert!(loaded.table.cell(0, 0).is_null());
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let loaded = load("");
        assert_eq!(loaded.table.row_count(), 0);
        assert_eq!(loaded.table.column_count(), 0);
    }
}
