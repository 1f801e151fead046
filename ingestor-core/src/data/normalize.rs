//! Identity-column removal and missing-marker rewriting.

use super::dataset::{Dataset, Value};

/// Column the document store assigns to every record.
pub const ID_COLUMN: &str = "_id";

/// Literal the source data uses for "no value". Matched exactly, case-sensitive.
pub const MISSING_SENTINEL: &str = "na";

/// What [`normalize`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub dropped_id: bool,
    pub replaced_sentinels: usize,
}

/// Drop the identity column if present, then rewrite every `"na"` cell to `Null`.
///
/// No other cell is touched: no trimming, type coercion or case folding.
pub fn normalize(dataset: &mut Dataset) -> NormalizeSummary {
    let dropped_id = dataset.drop_column(ID_COLUMN);
    let mut replaced_sentinels = 0;
    for cell in dataset.cells_mut() {
        if matches!(cell, Value::String(s) if s.as_str() == MISSING_SENTINEL) {
            *cell = Value::Null;
            replaced_sentinels += 1;
        }
    }
    NormalizeSummary {
        dropped_id,
        replaced_sentinels,
    }
}
