//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result, anyhow};
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};
use tracing::{info, warn};

use crate::types::{RegionKey, Row};

/// Read the tabular input at `path` into rows keyed by `key_field`.
pub fn read_rows(path: &Path, key_field: &str) -> Result<Vec<Row>> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv] Failed to open CSV file: {}", path.display()))?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv] Failed to read CSV from {:?}", path))?;

    let rows = dataframe_to_rows(&df, key_field)?;
    info!("[io::csv] read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read rows from CSV text (for WASM/browser use).
pub fn read_rows_str(csv: &str, key_field: &str) -> Result<Vec<Row>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(csv.as_bytes()))
        .finish()
        .context("[io::csv] Failed to read CSV from string")?;

    dataframe_to_rows(&df, key_field)
}

/// Convert an all-string DataFrame into rows. Every column other than the key becomes a
/// raw cell; null cells are left out.
fn dataframe_to_rows(df: &DataFrame, key_field: &str) -> Result<Vec<Row>> {
    let keys = df.column(key_field)
        .map_err(|_| anyhow!("[io::csv] Key column {key_field:?} not found in CSV header"))?
        .str()
        .with_context(|| format!("[io::csv] Key column {key_field:?} is not a string column"))?;

    let columns = df.get_columns().iter()
        .filter(|column| column.name().as_str() != key_field)
        .map(|column| {
            let values = column.str()
                .with_context(|| format!("[io::csv] Column {:?} is not a string column", column.name().as_str()))?;
            Ok((column.name().to_string(), values))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let Some(key) = keys.get(i).map(str::trim).filter(|k| !k.is_empty()) else {
            warn!("[io::csv] skipping line {} with an empty {key_field:?}", i + 2);
            continue;
        };

        let mut row = Row::new(RegionKey::from(key));
        for (name, values) in &columns {
            if let Some(raw) = values.get(i) {
                row.cells.insert(name.clone(), raw.to_string());
            }
        }
        rows.push(row);
    }
    Ok(rows)
}
