/// Firestore documents client (REST)
///
/// Covers exactly the query shapes the app uses: point reads, creation with
/// server-assigned timestamps, get-all-ordered-by-field-descending,
/// array-membership any-of filtering, atomic field increments, atomic array
/// appends, and partial updates.
use rand::Rng;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::FirebaseConfig;
use crate::error::{FirebaseError, Result};
use crate::value::{self, Document};
use crate::{current_token, SessionStore};

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";

/// Maximum number of values the remote any-of membership filter accepts.
pub const ANY_OF_LIMIT: usize = 30;

/// Alphabet used for client-generated document auto-ids, matching the
/// Firebase SDK's 20-character ids.
const AUTO_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const AUTO_ID_LENGTH: usize = 20;

#[derive(Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    config: FirebaseConfig,
    session: SessionStore,
}

impl FirestoreClient {
    pub fn new(http: reqwest::Client, config: FirebaseConfig, session: SessionStore) -> Self {
        Self {
            http,
            config,
            session,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            FIRESTORE_BASE, self.config.project_id
        )
    }

    /// Full resource name of a document, as used in commit writes.
    fn document_name(&self, collection: &str, id: &str) -> String {
        format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.config.project_id, collection, id
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match current_token(&self.session) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn expect_json(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body: Value = response.json().await.unwrap_or_default();
        let message = body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        Err(FirebaseError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Point read. Returns `None` for a missing document.
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let url = format!("{}/{}/{}", self.documents_url(), collection, id);
        let response = self.authorize(self.http.get(&url)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = self.expect_json(response).await?;
        Ok(Some(Document::from_wire(&body)?))
    }

    /// Create a document under a client-generated auto-id.
    ///
    /// Fields named in `server_timestamps` are set to the commit time by the
    /// server rather than from a client clock. Returns the new document id.
    pub async fn create(
        &self,
        collection: &str,
        fields: Map<String, Value>,
        server_timestamps: &[&'static str],
    ) -> Result<String> {
        let id = auto_id();
        let name = self.document_name(collection, &id);
        let transforms: Vec<Value> = server_timestamps
            .iter()
            .map(|field| json!({ "fieldPath": field, "setToServerValue": "REQUEST_TIME" }))
            .collect();

        let write = json!({
            "update": { "name": name, "fields": value::encode_fields(&fields) },
            "updateTransforms": transforms,
            "currentDocument": { "exists": false }
        });
        self.commit(vec![write]).await?;
        debug!(%collection, %id, "document created");
        Ok(id)
    }

    /// Create or overwrite a document under a caller-chosen id.
    ///
    /// Same server-timestamp channel as `create`, without the
    /// must-not-exist precondition.
    pub async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        server_timestamps: &[&'static str],
    ) -> Result<()> {
        let name = self.document_name(collection, id);
        let transforms: Vec<Value> = server_timestamps
            .iter()
            .map(|field| json!({ "fieldPath": field, "setToServerValue": "REQUEST_TIME" }))
            .collect();

        let write = json!({
            "update": { "name": name, "fields": value::encode_fields(&fields) },
            "updateTransforms": transforms
        });
        self.commit(vec![write]).await?;
        debug!(%collection, %id, "document set");
        Ok(())
    }

    /// Fetch every document in a collection, ordered by `field` descending.
    pub async fn list_ordered_desc(&self, collection: &str, field: &str) -> Result<Vec<Document>> {
        self.run_query(json!({
            "from": [{ "collectionId": collection }],
            "orderBy": [{
                "field": { "fieldPath": field },
                "direction": "DESCENDING"
            }]
        }))
        .await
    }

    /// Array-membership any-of filter (OR semantics).
    ///
    /// The remote engine bounds the value list; exceeding the bound fails
    /// the call rather than chunking it.
    pub async fn query_any_of(
        &self,
        collection: &str,
        field: &str,
        values: &[String],
    ) -> Result<Vec<Document>> {
        if values.len() > ANY_OF_LIMIT {
            return Err(FirebaseError::FilterLimit {
                limit: ANY_OF_LIMIT,
                got: values.len(),
            });
        }
        let wire_values: Vec<Value> = values
            .iter()
            .map(|v| json!({ "stringValue": v }))
            .collect();
        self.run_query(json!({
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "ARRAY_CONTAINS_ANY",
                    "value": { "arrayValue": { "values": wire_values } }
                }
            }
        }))
        .await
    }

    /// Atomically increment a numeric field.
    pub async fn increment(&self, collection: &str, id: &str, field: &str, by: i64) -> Result<()> {
        let write = json!({
            "transform": {
                "document": self.document_name(collection, id),
                "fieldTransforms": [{
                    "fieldPath": field,
                    "increment": { "integerValue": by.to_string() }
                }]
            }
        });
        self.commit(vec![write]).await?;
        Ok(())
    }

    /// Atomically append values to an array field.
    ///
    /// Uses append-missing-elements semantics: a value equal to an existing
    /// element is not appended again.
    pub async fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<()> {
        let wire_values: Vec<Value> = values.iter().map(value::encode).collect();
        let write = json!({
            "transform": {
                "document": self.document_name(collection, id),
                "fieldTransforms": [{
                    "fieldPath": field,
                    "appendMissingElements": { "values": wire_values }
                }]
            }
        });
        self.commit(vec![write]).await?;
        Ok(())
    }

    /// Partial update: overwrite only the supplied fields.
    pub async fn patch(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<()> {
        let mut url = format!("{}/{}/{}?", self.documents_url(), collection, id);
        for (i, field) in fields.keys().enumerate() {
            if i > 0 {
                url.push('&');
            }
            url.push_str("updateMask.fieldPaths=");
            url.push_str(&urlencoding::encode(field));
        }
        let body = json!({ "fields": value::encode_fields(&fields) });
        let response = self
            .authorize(self.http.patch(&url).json(&body))
            .send()
            .await?;
        self.expect_json(response).await?;
        Ok(())
    }

    async fn run_query(&self, structured_query: Value) -> Result<Vec<Document>> {
        let url = format!("{}:runQuery", self.documents_url());
        let response = self
            .authorize(
                self.http
                    .post(&url)
                    .json(&json!({ "structuredQuery": structured_query })),
            )
            .send()
            .await?;
        let body = self.expect_json(response).await?;

        // runQuery streams one entry per result; entries carrying only a
        // readTime have no document.
        let entries = body
            .as_array()
            .ok_or_else(|| FirebaseError::Decode("runQuery response is not a list".to_string()))?;
        let mut documents = Vec::new();
        for entry in entries {
            if let Some(resource) = entry.get("document") {
                documents.push(Document::from_wire(resource)?);
            }
        }
        Ok(documents)
    }

    async fn commit(&self, writes: Vec<Value>) -> Result<Value> {
        let url = format!("{}:commit", self.documents_url());
        let response = self
            .authorize(self.http.post(&url).json(&json!({ "writes": writes })))
            .send()
            .await?;
        self.expect_json(response).await
    }
}

/// Generate a Firestore-style 20-character document id.
fn auto_id() -> String {
    let mut rng = rand::thread_rng();
    (0..AUTO_ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..AUTO_ID_ALPHABET.len());
            AUTO_ID_ALPHABET[idx] as char
        })
        .collect()
}
