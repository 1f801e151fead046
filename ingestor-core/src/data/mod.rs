//! Tabular data model and the normalization applied to freshly read collections.

pub mod dataset;
pub mod normalize;

pub use dataset::{Dataset, Record, Value, infer_scalar};
pub use normalize::{ID_COLUMN, MISSING_SENTINEL, NormalizeSummary, normalize};
