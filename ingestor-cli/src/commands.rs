//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use anyhow::Context;
use ingestor_core::config::{IngestionSettings, STORE_URL_ENV, load_config};
use ingestor_core::ingestion::read_csv;
use ingestor_core::{DataIngestion, DataIngestionArtifact, DocumentStore, IngestorConfig, MongoStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line overrides for `ingest`.
#[derive(Debug, Default)]
pub struct IngestOverrides {
    pub database: Option<String>,
    pub collection: Option<String>,
    pub ratio: Option<f64>,
    pub seed: Option<u64>,
    pub artifact_dir: Option<PathBuf>,
}

impl IngestOverrides {
    fn apply(self, settings: &mut IngestionSettings) {
        if let Some(database) = self.database {
            settings.database_name = database;
        }
        if let Some(collection) = self.collection {
            settings.collection_name = collection;
        }
        if let Some(ratio) = self.ratio {
            settings.train_test_split_ratio = ratio;
        }
        if let Some(seed) = self.seed {
            settings.random_seed = seed;
        }
        if let Some(dir) = self.artifact_dir {
            settings.artifact_dir = dir;
        }
    }
}

/// Handle a CLI subcommand.
pub async fn handle_command(
    command: Commands,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        Commands::Ingest {
            database,
            collection,
            ratio,
            seed,
            artifact_dir,
        } => {
            let overrides = IngestOverrides {
                database,
                collection,
                ratio,
                seed,
                artifact_dir,
            };
            handle_ingest(overrides, workspace, config_file).await
        }
        Commands::Push {
            file,
            database,
            collection,
        } => handle_push(&file, database, collection, workspace, config_file).await,
        Commands::Config { action } => handle_config(action, workspace, config_file),
    }
}

/// Load layered configuration, taking the store url from `MONGO_DB_URL` when unset.
fn load(workspace: &Path, config_file: Option<&Path>) -> anyhow::Result<IngestorConfig> {
    let mut config = load_config(Some(workspace), config_file)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    if config.store.url.is_none() {
        config.store.url = std::env::var(STORE_URL_ENV).ok();
    }
    Ok(config)
}

async fn handle_ingest(
    overrides: IngestOverrides,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = load(workspace, config_file)?;
    overrides.apply(&mut config.ingestion);
    config.validate()?;

    let store = MongoStore::new(config.store.clone())?;
    let artifact = run_ingestion(&config, Arc::new(store)).await?;
    println!("{}", serde_json::to_string_pretty(&artifact)?);
    Ok(())
}

/// Resolve this run's paths and drive the pipeline against `store`.
pub async fn run_ingestion(
    config: &IngestorConfig,
    store: Arc<dyn DocumentStore>,
) -> anyhow::Result<DataIngestionArtifact> {
    let run_config = config.ingestion.resolve(chrono::Utc::now());
    tracing::debug!(?run_config, "Resolved ingestion run");
    let artifact = DataIngestion::new(run_config, store)
        .initiate_data_ingestion()
        .await?;
    Ok(artifact)
}

async fn handle_push(
    file: &Path,
    database: Option<String>,
    collection: Option<String>,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load(workspace, config_file)?;
    let database = database.unwrap_or(config.ingestion.database_name);
    let collection = collection.unwrap_or(config.ingestion.collection_name);
    anyhow::ensure!(
        !database.trim().is_empty() && !collection.trim().is_empty(),
        "database and collection must be set (config file or --database/--collection)"
    );

    let store = MongoStore::new(config.store)?;
    let inserted = push_csv(file, &database, &collection, &store).await?;
    println!("Inserted {inserted} documents into {database}.{collection}");
    Ok(())
}

/// Upload every row of `file` as one document, typing numeric and boolean fields.
pub async fn push_csv(
    file: &Path,
    database: &str,
    collection: &str,
    store: &dyn DocumentStore,
) -> anyhow::Result<usize> {
    let mut dataset = read_csv(file)?;
    dataset.infer_scalars();
    tracing::info!(
        file = %file.display(),
        rows = dataset.row_count(),
        database,
        collection,
        "Pushing CSV to store"
    );
    let inserted = store
        .insert_many(database, collection, dataset.into_rows())
        .await
        .with_context(|| format!("inserting {} into {database}.{collection}", file.display()))?;
    Ok(inserted)
}

fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(Some(workspace), config_file)
                .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}
