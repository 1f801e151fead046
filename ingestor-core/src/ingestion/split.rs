//! Seeded train/test partitioning.

use super::feature_store::write_csv;
use crate::data::Dataset;
use crate::error::{IngestionError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::Path;

/// Training and evaluation subsets of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Reject ratios outside the open interval (0, 1), NaN included.
pub fn validate_ratio(ratio: f64) -> Result<()> {
    if ratio > 0.0 && ratio < 1.0 {
        Ok(())
    } else {
        Err(IngestionError::validation(
            "checking train/test split ratio",
            format!("ratio must be strictly between 0 and 1, got {ratio}"),
        ))
    }
}

/// Reject tables with no rows.
pub fn ensure_splittable(dataset: &Dataset) -> Result<()> {
    if dataset.is_empty() {
        return Err(IngestionError::validation(
            "splitting dataset",
            "collection has no rows",
        ));
    }
    Ok(())
}

/// Rows assigned to the test subset: `round(ratio * n)`, capped at `n`.
pub fn test_size(n: usize, ratio: f64) -> usize {
    ((n as f64 * ratio).round() as usize).min(n)
}

/// Partition `dataset` into train and test subsets.
///
/// Row indices are shuffled with a PRNG seeded from `seed`; the first
/// [`test_size`] shuffled rows form the test subset and the rest form the
/// training subset. The same table and seed always give the same partition.
/// Both subsets keep the source's full column list. A table without rows
/// cannot be split.
pub fn train_test_split(dataset: &Dataset, ratio: f64, seed: u64) -> Result<TrainTestSplit> {
    validate_ratio(ratio)?;
    ensure_splittable(dataset)?;
    let n = dataset.row_count();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(test_size(n, ratio));
    Ok(TrainTestSplit {
        train: dataset.select(train_idx),
        test: dataset.select(test_idx),
    })
}

/// Write both subsets, creating parent directories for each path.
pub fn write_split(split: &TrainTestSplit, train_path: &Path, test_path: &Path) -> Result<()> {
    write_csv(&split.train, train_path)?;
    write_csv(&split.test, test_path)?;
    Ok(())
}
