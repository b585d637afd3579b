//! MongoDB client: connection, typed collections, indexes and the
//! bounded-call helpers every repository goes through.

use std::future::IntoFuture;
use std::time::Duration;

use bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{info, warn};

use crate::domain::foundation::{DomainError, ErrorCode};

const DUPLICATE_KEY: i32 = 11000;

/// Implemented by document types that declare their indexes.
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Per-call bounds applied to every storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub op_timeout: Duration,
    /// Extra attempts for pure reads. Writes are never retried.
    pub read_retries: u32,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self {
            op_timeout: Duration::from_millis(5000),
            read_retries: 2,
        }
    }
}

#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    database: Database,
    timeouts: StoreTimeouts,
}

impl MongoClient {
    /// Connects and pings. Server selection is capped so an unreachable
    /// cluster fails startup instead of hanging it.
    pub async fn connect(
        uri: &str,
        db_name: &str,
        timeouts: StoreTimeouts,
    ) -> Result<Self, DomainError> {
        let selection_ms = timeouts.op_timeout.as_millis();
        let bounded_uri = if uri.contains('?') {
            format!(
                "{}&serverSelectionTimeoutMS={}&connectTimeoutMS={}",
                uri, selection_ms, selection_ms
            )
        } else {
            format!(
                "{}?serverSelectionTimeoutMS={}&connectTimeoutMS={}",
                uri, selection_ms, selection_ms
            )
        };

        let client = Client::with_uri_str(&bounded_uri)
            .await
            .map_err(|e| DomainError::database(format!("Failed to connect to MongoDB: {}", e)))?;
        let database = client.database(db_name);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DomainError::database(format!("MongoDB ping failed: {}", e)))?;

        info!(database = db_name, "connected to MongoDB");
        Ok(Self {
            client,
            database,
            timeouts,
        })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    pub fn timeouts(&self) -> StoreTimeouts {
        self.timeouts
    }

    /// Creates the indexes `T` declares on `collection`.
    pub async fn apply_indexes<T>(&self, collection: &Collection<T>) -> Result<(), DomainError>
    where
        T: IntoIndexes + Send + Sync,
    {
        let models: Vec<IndexModel> = T::into_indices()
            .into_iter()
            .map(|(keys, options)| IndexModel::builder().keys(keys).options(options).build())
            .collect();
        if models.is_empty() {
            return Ok(());
        }

        collection.create_indexes(models).await.map_err(|e| {
            DomainError::database(format!(
                "Failed to create indexes on {}: {}",
                collection.name(),
                e
            ))
        })?;
        Ok(())
    }

    /// Closes pooled connections. Call once, after the server has drained.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("MongoDB client shut down");
    }
}

/// Runs one storage call under the operation timeout.
pub(crate) async fn bounded<T, F>(
    timeouts: &StoreTimeouts,
    operation: &'static str,
    call: F,
) -> Result<T, DomainError>
where
    F: IntoFuture<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(timeouts.op_timeout, call).await {
        Ok(result) => result.map_err(|e| storage_error(operation, &e)),
        Err(_) => Err(DomainError::new(
            ErrorCode::StorageTimeout,
            format!("{} timed out after {:?}", operation, timeouts.op_timeout),
        )
        .with_detail("operation", operation)),
    }
}

/// Like `bounded`, but retries transient failures up to `read_retries`
/// times. Only for reads.
pub(crate) async fn read_with_retry<T, F, Fut>(
    timeouts: &StoreTimeouts,
    operation: &'static str,
    mut call: F,
) -> Result<T, DomainError>
where
    F: FnMut() -> Fut,
    Fut: IntoFuture<Output = mongodb::error::Result<T>>,
{
    let mut attempt = 0;
    loop {
        match bounded(timeouts, operation, call()).await {
            Err(err) if err.code.is_transient() && attempt < timeouts.read_retries => {
                attempt += 1;
                warn!(operation, attempt, error = %err, "retrying read");
            }
            result => return result,
        }
    }
}

/// True for a unique-index violation.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn storage_error(operation: &'static str, err: &mongodb::error::Error) -> DomainError {
    let code = match err.kind.as_ref() {
        ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } | ErrorKind::ConnectionPoolCleared { .. } => {
            ErrorCode::StorageTimeout
        }
        _ if is_duplicate_key(err) => ErrorCode::DuplicateKey,
        _ => ErrorCode::DatabaseError,
    };
    DomainError::new(code, format!("{} failed: {}", operation, err)).with_detail("operation", operation)
}
