//! Collection reader: full scan of one collection into a [`Dataset`].

use crate::data::Dataset;
use crate::error::Result;
use crate::store::DocumentStore;
use std::sync::Arc;

/// Reads whole collections from a [`DocumentStore`].
#[derive(Clone)]
pub struct CollectionReader {
    store: Arc<dyn DocumentStore>,
}

impl CollectionReader {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Retrieve every document of `database.collection` as a table.
    pub async fn read(&self, database: &str, collection: &str) -> Result<Dataset> {
        tracing::info!(
            store = %self.store.describe(),
            database,
            collection,
            "Reading collection"
        );
        let records = self.store.find_all(database, collection).await?;
        let dataset = Dataset::from_records(records);
        tracing::info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "Collection read"
        );
        Ok(dataset)
    }
}
