//! MongoDB-backed document store.

use super::DocumentStore;
use crate::config::StoreConfig;
use crate::data::{Record, Value};
use crate::error::{IngestionError, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Client;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::{ClientOptions, Tls, TlsOptions};
use std::time::Duration;

/// [`DocumentStore`] talking to a MongoDB deployment.
///
/// Each operation opens a client, runs, and shuts the client down again on
/// every exit path, so no connection pool outlives the call.
pub struct MongoStore {
    url: String,
    config: StoreConfig,
}

impl MongoStore {
    /// Create a store from explicit settings. The connection string must be set.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let url = config
            .url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                IngestionError::validation(
                    "configuring document store",
                    "no connection string provided (set store.url or MONGO_DB_URL)",
                )
            })?;
        Ok(Self { url, config })
    }

    async fn connect(&self) -> Result<Client> {
        let mut options = ClientOptions::parse(self.url.as_str())
            .await
            .map_err(|e| IngestionError::network("parsing store connection string", e))?;

        if self.config.tls && self.config.allow_invalid_certificates {
            tracing::warn!(
                store = %self.describe(),
                "Peer certificate validation is disabled for the document store"
            );
        }
        if let Some(tls) = tls_options(&self.config) {
            options.tls = Some(tls);
        }
        options.app_name = self.config.app_name.clone();
        options.server_selection_timeout = Some(Duration::from_secs(
            self.config.server_selection_timeout_secs,
        ));

        tracing::debug!(store = %self.describe(), tls = self.config.tls, "Connecting to document store");
        Client::with_options(options).map_err(|e| IngestionError::network("creating store client", e))
    }

    /// Run `op` against a fresh client and always shut the client down afterwards.
    async fn scoped<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnOnce(Client) -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let client = self.connect().await?;
        let result = op(client.clone()).await;
        client.shutdown().await;
        result
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_all(&self, database: &str, collection: &str) -> Result<Vec<Record>> {
        let context = format!("reading collection {database}.{collection}");
        self.scoped(|client| async move {
            let coll = client.database(database).collection::<Document>(collection);
            let cursor = coll
                .find(doc! {})
                .await
                .map_err(|e| IngestionError::network(context.clone(), e))?;
            let documents: Vec<Document> = cursor
                .try_collect()
                .await
                .map_err(|e| IngestionError::network(context.clone(), e))?;
            documents.into_iter().map(document_to_record).collect()
        })
        .await
    }

    async fn insert_many(
        &self,
        database: &str,
        collection: &str,
        records: Vec<Record>,
    ) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let context = format!("inserting into collection {database}.{collection}");
        let documents = records
            .iter()
            .map(|record| {
                mongodb::bson::to_document(record)
                    .map_err(|e| IngestionError::serialization(context.clone(), e))
            })
            .collect::<Result<Vec<Document>>>()?;

        self.scoped(|client| async move {
            let coll = client.database(database).collection::<Document>(collection);
            let inserted = coll
                .insert_many(documents)
                .await
                .map_err(|e| IngestionError::network(context.clone(), e))?;
            Ok(inserted.inserted_ids.len())
        })
        .await
    }

    fn describe(&self) -> String {
        redact_url(&self.url)
    }
}

/// Transport settings forced by `config`. `None` leaves the choice to the connection string.
fn tls_options(config: &StoreConfig) -> Option<Tls> {
    if !config.tls {
        return None;
    }
    let mut tls = TlsOptions::default();
    if config.allow_invalid_certificates {
        tls.allow_invalid_certificates = Some(true);
    }
    Some(Tls::Enabled(tls))
}

/// Convert a stored document to a row via relaxed extended JSON.
fn document_to_record(document: Document) -> Result<Record> {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => Ok(map),
        other => Err(IngestionError::serialization(
            "converting stored document",
            format!("expected an object, got {other}"),
        )),
    }
}

/// Strip credentials from a connection string for logging.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
