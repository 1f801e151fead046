//! Orchestration of one ingestion run.

use super::feature_store::export_to_feature_store;
use super::reader::CollectionReader;
use super::split::{ensure_splittable, train_test_split, write_split};
use crate::artifact::DataIngestionArtifact;
use crate::config::DataIngestionConfig;
use crate::data::{Dataset, normalize};
use crate::error::{IngestionError, Result};
use crate::store::DocumentStore;
use std::sync::Arc;
use tracing::Instrument;

/// Runs reader -> normalizer -> feature store -> splitter for one configuration.
pub struct DataIngestion {
    config: DataIngestionConfig,
    reader: CollectionReader,
}

impl DataIngestion {
    pub fn new(config: DataIngestionConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            reader: CollectionReader::new(store),
        }
    }

    pub fn config(&self) -> &DataIngestionConfig {
        &self.config
    }

    /// Read the configured collection and normalize it.
    pub async fn export_collection_as_dataset(&self) -> Result<Dataset> {
        let mut dataset = self
            .reader
            .read(&self.config.database_name, &self.config.collection_name)
            .await?;
        let summary = normalize(&mut dataset);
        tracing::info!(
            dropped_id = summary.dropped_id,
            replaced_sentinels = summary.replaced_sentinels,
            "Normalized collection"
        );
        Ok(dataset)
    }

    /// Persist the table to the feature store path and hand it back unchanged.
    pub fn export_data_to_feature_store(&self, dataset: Dataset) -> Result<Dataset> {
        export_to_feature_store(dataset, &self.config.feature_store_file_path)
    }

    /// Split the table and write the training and testing files.
    pub fn split_data_as_train_test(&self, dataset: &Dataset) -> Result<()> {
        let split = train_test_split(
            dataset,
            self.config.train_test_split_ratio,
            self.config.random_seed,
        )?;
        tracing::info!(
            train_rows = split.train.row_count(),
            test_rows = split.test.row_count(),
            "Exporting train and test files"
        );
        write_split(
            &split,
            &self.config.training_file_path,
            &self.config.testing_file_path,
        )?;
        tracing::info!(
            train = %self.config.training_file_path.display(),
            test = %self.config.testing_file_path.display(),
            "Exported train and test files"
        );
        Ok(())
    }

    /// Run every stage in order. The first failure aborts the run and no artifact is produced.
    pub async fn initiate_data_ingestion(&self) -> Result<DataIngestionArtifact> {
        let span = tracing::info_span!(
            "data_ingestion",
            database = %self.config.database_name,
            collection = %self.config.collection_name,
        );
        async {
            self.config.validate()?;
            let dataset = self.export_collection_as_dataset().await?;
            ensure_splittable(&dataset)?;
            let dataset = self.export_data_to_feature_store(dataset)?;
            self.split_data_as_train_test(&dataset)?;

            let artifact = DataIngestionArtifact::new(
                self.config.training_file_path.clone(),
                self.config.testing_file_path.clone(),
            );
            tracing::info!(?artifact, "Data ingestion completed");
            Ok::<_, IngestionError>(artifact)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    fn config(root: &Path) -> DataIngestionConfig {
        DataIngestionConfig {
            database_name: "security".into(),
            collection_name: "network_data".into(),
            feature_store_file_path: root.join("feature_store").join("data.csv"),
            training_file_path: root.join("ingested").join("train.csv"),
            testing_file_path: root.join("ingested").join("test.csv"),
            train_test_split_ratio: 0.25,
            random_seed: 42,
        }
    }

    fn store() -> Arc<MemoryStore> {
        let docs = (0..8).map(|i| {
            json!({"x": if i < 2 { json!("na") } else { json!(i) }, "Result": i % 2})
                .as_object()
                .cloned()
                .unwrap()
        });
        Arc::new(MemoryStore::new().with_collection("security", "network_data", docs))
    }

    #[tokio::test]
    async fn test_export_collection_normalizes() {
        let dir = TempDir::new().unwrap();
        let ingestion = DataIngestion::new(config(dir.path()), store());
        let ds = ingestion.export_collection_as_dataset().await.unwrap();
        assert_eq!(ds.columns(), ["x", "Result"]);
        assert_eq!(ds.missing_count("x"), 2);
    }

    #[tokio::test]
    async fn test_run_produces_artifact() {
        let dir = TempDir::new().unwrap();
        let cfg = config(dir.path());
        let ingestion = DataIngestion::new(cfg.clone(), store());
        let artifact = ingestion.initiate_data_ingestion().await.unwrap();

        assert_eq!(artifact.trained_file_path(), cfg.training_file_path);
        assert_eq!(artifact.test_file_path(), cfg.testing_file_path);
        assert!(cfg.feature_store_file_path.exists());
        assert!(artifact.trained_file_path().exists());
        assert!(artifact.test_file_path().exists());
    }

    #[tokio::test]
    async fn test_invalid_ratio_fails_before_any_write() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(dir.path());
        cfg.train_test_split_ratio = 1.0;
        let ingestion = DataIngestion::new(cfg.clone(), store());
        let err = ingestion.initiate_data_ingestion().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!cfg.feature_store_file_path.exists());
    }

    #[tokio::test]
    async fn test_empty_collection_fails_before_any_write() {
        let dir = TempDir::new().unwrap();
        let cfg = config(dir.path());
        let ingestion = DataIngestion::new(cfg.clone(), Arc::new(MemoryStore::new()));
        let err = ingestion.initiate_data_ingestion().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!cfg.feature_store_file_path.exists());
    }
}
