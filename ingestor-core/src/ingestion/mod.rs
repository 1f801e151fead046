//! The ingestion-and-split pipeline.
//!
//! ```text
//!  document store
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  reader  │  full collection scan → Dataset
//!   └──────────┘
//!        │  normalize: drop `_id`, "na" → null
//!        ▼
//!   ┌───────────────┐
//!   │ feature_store │  CSV snapshot, dataset passed through
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  split   │  seeded shuffle → train.csv / test.csv
//!   └──────────┘
//!        │
//!        ▼
//!   DataIngestionArtifact
//! ```

pub mod feature_store;
pub mod pipeline;
pub mod reader;
pub mod split;

pub use feature_store::{ensure_parent_dir, export_to_feature_store, read_csv, write_csv};
pub use pipeline::DataIngestion;
pub use reader::CollectionReader;
pub use split::{
    TrainTestSplit, ensure_splittable, test_size, train_test_split, validate_ratio, write_split,
};
