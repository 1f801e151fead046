//! In-memory table of schema-less records.

use serde::{Deserialize, Serialize};

/// A dynamically typed cell. `Null` is the canonical missing value.
pub type Value = serde_json::Value;

/// One row: column name to cell. Absent keys read as missing.
pub type Record = serde_json::Map<String, Value>;

/// An ordered sequence of records plus the ordered union of their keys.
///
/// Documents in a collection may carry different keys, so rows are maps rather
/// than fixed-width vectors. `columns` lists every key seen, in order of first
/// appearance, and drives the column order of every file written from the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from records, deriving the column list from their keys.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut dataset = Self::new();
        for record in records {
            dataset.push(record);
        }
        dataset
    }

    /// Build a table with an explicit column list (e.g. a subset of a larger table).
    pub fn with_columns(columns: Vec<String>, rows: Vec<Record>) -> Self {
        let mut dataset = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for record in rows {
            dataset.push(record);
        }
        dataset
    }

    /// Append a record, registering any keys not seen before.
    pub fn push(&mut self, record: Record) {
        for key in record.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(record);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Cell at (`row`, `column`). `None` when the row is out of range or lacks the key.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Remove a column from the header and every row. Returns whether it existed.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.columns.iter().position(|c| c == name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(name);
        }
        true
    }

    /// Mutable access to every present cell.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.rows.iter_mut().flat_map(|row| row.values_mut())
    }

    /// Number of rows where `column` is null or absent.
    pub fn missing_count(&self, column: &str) -> usize {
        self.rows
            .iter()
            .filter(|row| row.get(column).is_none_or(Value::is_null))
            .count()
    }

    /// New table holding the rows at `indices` (in that order) and the same column list.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Replace textual cells with the scalar they spell (integer, float, boolean).
    pub fn infer_scalars(&mut self) {
        for cell in self.cells_mut() {
            if let Value::String(text) = cell {
                let typed = infer_scalar(text);
                *cell = typed;
            }
        }
    }
}

/// Best-effort typing of a text field: integers, then floats, then booleans.
pub fn infer_scalar(text: &str) -> Value {
    if let Ok(i) = text.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = text.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    match text {
        "true" | "True" => Value::Bool(true),
        "false" | "False" => Value::Bool(false),
        _ => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_columns_follow_first_appearance() {
        let ds = Dataset::from_records([
            record(json!({"a": 1, "b": 2})),
            record(json!({"b": 3, "c": 4})),
            record(json!({"d": null, "a": 5})),
        ]);
        assert_eq!(ds.columns(), ["a", "b", "c", "d"]);
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.get(1, "a"), None);
        assert_eq!(ds.get(1, "c"), Some(&json!(4)));
    }

    #[test]
    fn test_drop_column() {
        let mut ds = Dataset::from_records([
            record(json!({"_id": "x1", "a": 1})),
            record(json!({"a": 2})),
        ]);
        assert!(ds.drop_column("_id"));
        assert_eq!(ds.columns(), ["a"]);
        assert!(ds.rows().iter().all(|r| !r.contains_key("_id")));
        assert!(!ds.drop_column("_id"));
    }

    #[test]
    fn test_missing_count_counts_null_and_absent() {
        let ds = Dataset::from_records([
            record(json!({"x": null})),
            record(json!({"y": 1})),
            record(json!({"x": 0})),
        ]);
        assert_eq!(ds.missing_count("x"), 2);
        assert_eq!(ds.missing_count("y"), 2);
    }

    #[test]
    fn test_select_keeps_columns() {
        let ds = Dataset::from_records([
            record(json!({"a": 1})),
            record(json!({"b": 2})),
            record(json!({"a": 3})),
        ]);
        let subset = ds.select(&[2, 0]);
        assert_eq!(subset.columns(), ["a", "b"]);
        assert_eq!(subset.get(0, "a"), Some(&json!(3)));
        assert_eq!(subset.get(1, "a"), Some(&json!(1)));
    }

    #[test]
    fn test_with_columns_adds_unlisted_keys() {
        let ds = Dataset::with_columns(vec!["a".into()], vec![record(json!({"a": 1, "z": 2}))]);
        assert_eq!(ds.columns(), ["a", "z"]);
    }

    #[test]
    fn test_infer_scalar() {
        assert_eq!(infer_scalar("42"), json!(42));
        assert_eq!(infer_scalar("-1.5"), json!(-1.5));
        assert_eq!(infer_scalar("true"), json!(true));
        assert_eq!(infer_scalar("na"), json!("na"));
        assert_eq!(infer_scalar("NaN"), json!("NaN"));
    }
}
