/// Store seams over the external services
///
/// The traits expose exactly the query shapes this app uses against the
/// remote document collection and blob store. Production wiring goes
/// through the firebase-client types; tests substitute in-memory fakes.
use async_trait::async_trait;
use firebase_client::{Document, FirestoreClient, StorageClient};
use serde_json::{Map, Value};

#[cfg(test)]
use mockall::automock;

use crate::error::Result;

/// The remote document collection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read; `None` for a missing document.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Create a document under a new auto-id. Fields named in
    /// `server_timestamps` receive the server commit time.
    async fn create(
        &self,
        collection: &str,
        fields: Map<String, Value>,
        server_timestamps: &[&'static str],
    ) -> Result<String>;

    /// Create or overwrite a document under a caller-chosen id, with the
    /// same server-timestamp channel as `create`.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        server_timestamps: &[&'static str],
    ) -> Result<()>;

    /// Every document in the collection, ordered by `field` descending.
    async fn list_ordered_desc(&self, collection: &str, field: &str) -> Result<Vec<Document>>;

    /// Array-membership any-of filter (OR semantics, bounded value list).
    async fn query_any_of(
        &self,
        collection: &str,
        field: &str,
        values: &[String],
    ) -> Result<Vec<Document>>;

    /// Atomic numeric increment.
    async fn increment(&self, collection: &str, id: &str, field: &str, by: i64) -> Result<()>;

    /// Atomic array append (append-missing-elements semantics).
    async fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<()>;

    /// Partial update of the supplied fields only.
    async fn patch(&self, collection: &str, id: &str, fields: Map<String, Value>) -> Result<()>;
}

/// The remote blob store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a payload under `path`; returns the stable download URL.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;

    /// Resolve the download URL of an existing object.
    async fn download_url(&self, path: &str) -> Result<String>;
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(FirestoreClient::get(self, collection, id).await?)
    }

    async fn create(
        &self,
        collection: &str,
        fields: Map<String, Value>,
        server_timestamps: &[&'static str],
    ) -> Result<String> {
        Ok(FirestoreClient::create(self, collection, fields, server_timestamps).await?)
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        server_timestamps: &[&'static str],
    ) -> Result<()> {
        Ok(FirestoreClient::set(self, collection, id, fields, server_timestamps).await?)
    }

    async fn list_ordered_desc(&self, collection: &str, field: &str) -> Result<Vec<Document>> {
        Ok(FirestoreClient::list_ordered_desc(self, collection, field).await?)
    }

    async fn query_any_of(
        &self,
        collection: &str,
        field: &str,
        values: &[String],
    ) -> Result<Vec<Document>> {
        Ok(FirestoreClient::query_any_of(self, collection, field, values).await?)
    }

    async fn increment(&self, collection: &str, id: &str, field: &str, by: i64) -> Result<()> {
        Ok(FirestoreClient::increment(self, collection, id, field, by).await?)
    }

    async fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<()> {
        Ok(FirestoreClient::array_append(self, collection, id, field, values).await?)
    }

    async fn patch(&self, collection: &str, id: &str, fields: Map<String, Value>) -> Result<()> {
        Ok(FirestoreClient::patch(self, collection, id, fields).await?)
    }
}

#[async_trait]
impl BlobStore for StorageClient {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        Ok(StorageClient::upload(self, path, bytes, content_type).await?)
    }

    async fn download_url(&self, path: &str) -> Result<String> {
        Ok(StorageClient::download_url(self, path).await?)
    }
}
