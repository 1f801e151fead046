//! Document store abstraction.
//!
//! The pipeline only needs "given a database and collection, return every
//! document". [`DocumentStore`] captures that capability; [`MongoStore`] is the
//! production implementation and [`MemoryStore`] backs tests.

pub mod memory;
pub mod mongo;

use crate::data::Record;
use crate::error::Result;
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A source of schema-less documents grouped into databases and collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document of `collection` in `database` (full scan, no filter).
    async fn find_all(&self, database: &str, collection: &str) -> Result<Vec<Record>>;

    /// Insert `records` into `collection`, returning how many were stored.
    async fn insert_many(&self, database: &str, collection: &str, records: Vec<Record>)
    -> Result<usize>;

    /// Human-readable location for logs. Must not contain credentials.
    fn describe(&self) -> String;
}
