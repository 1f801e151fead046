//! In-process document store.

use super::DocumentStore;
use crate::data::{ID_COLUMN, Record, Value};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// A [`DocumentStore`] held entirely in memory.
///
/// Inserted records without an identity get one in the same shape the
/// production store reports object ids (`{"$oid": "<24 hex digits>"}`).
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<(String, String), Vec<Record>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding of a collection.
    pub fn with_collection(
        self,
        database: &str,
        collection: &str,
        records: impl IntoIterator<Item = Record>,
    ) -> Self {
        {
            let mut collections = self
                .collections
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let docs = collections
                .entry((database.to_string(), collection.to_string()))
                .or_default();
            for record in records {
                docs.push(self.with_identity(record));
            }
        }
        self
    }

    /// Number of documents currently held in a collection.
    pub fn len(&self, database: &str, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&(database.to_string(), collection.to_string()))
            .map_or(0, Vec::len)
    }

    fn with_identity(&self, record: Record) -> Record {
        if record.contains_key(ID_COLUMN) {
            return record;
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut oid = Record::new();
        oid.insert("$oid".to_string(), Value::String(format!("{id:024x}")));

        // Identity leads the document, as the production store lays it out.
        let mut document = Record::new();
        document.insert(ID_COLUMN.to_string(), Value::Object(oid));
        document.extend(record);
        document
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, database: &str, collection: &str) -> Result<Vec<Record>> {
        let collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(collections
            .get(&(database.to_string(), collection.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_many(
        &self,
        database: &str,
        collection: &str,
        records: Vec<Record>,
    ) -> Result<usize> {
        let count = records.len();
        let records: Vec<Record> = records.into_iter().map(|r| self.with_identity(r)).collect();
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry((database.to_string(), collection.to_string()))
            .or_default()
            .extend(records);
        Ok(count)
    }

    fn describe(&self) -> String {
        "memory://".to_string()
    }
}
