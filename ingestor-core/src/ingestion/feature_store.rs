//! Feature store snapshot: CSV persistence of a [`Dataset`].
//!
//! Files are UTF-8, comma-separated, with a header row and no index column.
//! Missing cells (null or absent) are written as empty fields.

use crate::data::{Dataset, Record, Value};
use crate::error::{ErrorKind, IngestionError, Result};
use std::borrow::Cow;
use std::path::Path;

/// Create every missing parent directory of `path`. Existing directories are fine.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            IngestionError::filesystem(format!("creating directory {}", parent.display()), e)
        })?;
    }
    Ok(())
}

/// Write `dataset` to `path` as CSV, creating parent directories and overwriting any existing file.
///
/// A table with rows but no columns has no CSV form and is rejected before the file is created.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let context = || format!("writing {}", path.display());
    if dataset.column_count() == 0 && dataset.row_count() > 0 {
        return Err(IngestionError::new(
            ErrorKind::Serialization,
            context(),
            format!("{} rows have no columns to write", dataset.row_count()),
        ));
    }
    ensure_parent_dir(path)?;

    let mut writer = csv::Writer::from_path(path).map_err(|e| IngestionError::csv(context(), e))?;
    if dataset.column_count() > 0 {
        writer
            .write_record(dataset.columns())
            .map_err(|e| IngestionError::csv(context(), e))?;
        let mut line = csv::StringRecord::with_capacity(256, dataset.column_count());
        for row in dataset.rows() {
            line.clear();
            for column in dataset.columns() {
                line.push_field(&cell_text(row.get(column)));
            }
            writer
                .write_record(&line)
                .map_err(|e| IngestionError::csv(context(), e))?;
        }
    }
    writer
        .flush()
        .map_err(|e| IngestionError::filesystem(context(), e))?;
    Ok(())
}

/// Persist the full normalized table and hand it back for the next stage.
pub fn export_to_feature_store(dataset: Dataset, path: &Path) -> Result<Dataset> {
    tracing::info!(
        path = %path.display(),
        rows = dataset.row_count(),
        "Exporting dataset to feature store"
    );
    write_csv(&dataset, path)?;
    Ok(dataset)
}

/// Load a CSV written by [`write_csv`]. Empty fields read as `Null`, all others as strings.
pub fn read_csv(path: &Path) -> Result<Dataset> {
    let context = || format!("reading {}", path.display());
    let mut reader = csv::Reader::from_path(path).map_err(|e| IngestionError::csv(context(), e))?;
    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| IngestionError::csv(context(), e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestionError::csv(context(), e))?;
        let row: Record = columns
            .iter()
            .zip(record.iter())
            .map(|(column, field)| {
                let value = if field.is_empty() {
                    Value::Null
                } else {
                    Value::String(field.to_string())
                };
                (column.clone(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(Dataset::with_columns(columns, rows))
}

/// Text of one cell: strings verbatim, missing as empty, everything else as compact JSON.
fn cell_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}
