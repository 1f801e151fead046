//! # ingestor-core: document-store ingestion and train/test splitting
//!
//! Pulls every document of a collection into memory, strips the store identity
//! column, rewrites `"na"` markers to missing values, snapshots the table to a
//! CSV feature store, and writes a reproducible train/test split next to it.
//! A successful run returns a [`DataIngestionArtifact`] pointing at both files.
//!
//! The store is reached only through [`DocumentStore`], so runs can target
//! MongoDB ([`MongoStore`]) or an in-process [`MemoryStore`].

pub mod artifact;
pub mod config;
pub mod data;
pub mod error;
pub mod ingestion;
pub mod store;

pub use artifact::DataIngestionArtifact;
pub use config::{DataIngestionConfig, IngestionSettings, IngestorConfig, StoreConfig, load_config};
pub use data::{Dataset, Record, Value};
pub use error::{ErrorKind, IngestionError, Result};
pub use ingestion::DataIngestion;
pub use store::{DocumentStore, MemoryStore, MongoStore};
