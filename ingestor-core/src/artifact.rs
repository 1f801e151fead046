//! Result record handed back by a successful ingestion run.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Locations of the training and testing files produced by one run.
///
/// Only constructed after both files have been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataIngestionArtifact {
    trained_file_path: PathBuf,
    test_file_path: PathBuf,
}

impl DataIngestionArtifact {
    pub(crate) fn new(trained_file_path: PathBuf, test_file_path: PathBuf) -> Self {
        Self {
            trained_file_path,
            test_file_path,
        }
    }

    pub fn trained_file_path(&self) -> &Path {
        &self.trained_file_path
    }

    pub fn test_file_path(&self) -> &Path {
        &self.test_file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_field_names() {
        let artifact = DataIngestionArtifact::new("out/train.csv".into(), "out/test.csv".into());
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["trained_file_path"], "out/train.csv");
        assert_eq!(json["test_file_path"], "out/test.csv");
    }
}
