//! Shared in-memory fakes for integration tests.
//!
//! `MemoryStore` mirrors the remote document collection closely enough to
//! exercise the full service stack: auto ids, server-assigned timestamps,
//! descending ordering, the bounded any-of filter and append-missing
//! array semantics. Call counts are recorded so tests can assert that
//! rejected input never reaches the store.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use firebase_client::{CurrentUser, Document};
use serde_json::{json, Map, Value};

use crafty_app::db::{BlobStore, DocumentStore};
use crafty_app::error::{AppError, Result};
use crafty_app::services::AuthProvider;

const ANY_OF_LIMIT: usize = 30;

#[derive(Default)]
struct Collections {
    docs: HashMap<String, Vec<(String, Map<String, Value>)>>,
    seq: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
    calls: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total store calls so far, counting failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent write fail; reads keep working.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read fail; writes keep working.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn document(&self, collection: &str, id: &str) -> Option<Document> {
        let inner = self.inner.lock().unwrap();
        inner.docs.get(collection).and_then(|docs| {
            docs.iter().find(|(doc_id, _)| doc_id == id).map(|(doc_id, fields)| Document {
                id: doc_id.clone(),
                fields: fields.clone(),
                create_time: None,
                update_time: None,
            })
        })
    }

    pub fn len(&self, collection: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.docs.get(collection).map(Vec::len).unwrap_or(0)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(AppError::Remote("simulated write failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(AppError::Remote("simulated read failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn timestamp_for(seq: u64) -> String {
        let base = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
        (base + Duration::seconds(seq as i64)).to_rfc3339()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.record_call();
        Ok(self.document(collection, id))
    }

    async fn create(
        &self,
        collection: &str,
        mut fields: Map<String, Value>,
        server_timestamps: &[&'static str],
    ) -> Result<String> {
        self.record_call();
        self.check_write()?;
        let mut inner = self.inner.lock().unwrap();
        inner.seq += 1;
        let stamp = Self::timestamp_for(inner.seq);
        for field in server_timestamps {
            fields.insert(field.to_string(), json!(stamp));
        }
        let id = format!("doc-{}", inner.seq);
        inner
            .docs
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), fields));
        Ok(id)
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        mut fields: Map<String, Value>,
        server_timestamps: &[&'static str],
    ) -> Result<()> {
        self.record_call();
        self.check_write()?;
        let mut inner = self.inner.lock().unwrap();
        inner.seq += 1;
        let stamp = Self::timestamp_for(inner.seq);
        for field in server_timestamps {
            fields.insert(field.to_string(), json!(stamp));
        }
        let docs = inner.docs.entry(collection.to_string()).or_default();
        if let Some((_, existing)) = docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            *existing = fields;
        } else {
            docs.push((id.to_string(), fields));
        }
        Ok(())
    }

    async fn list_ordered_desc(&self, collection: &str, field: &str) -> Result<Vec<Document>> {
        self.record_call();
        self.check_read()?;
        let inner = self.inner.lock().unwrap();
        let mut docs: Vec<Document> = inner
            .docs
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                        create_time: None,
                        update_time: None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        docs.sort_by(|a, b| {
            let a_key = a.fields.get(field).and_then(Value::as_str).unwrap_or("");
            let b_key = b.fields.get(field).and_then(Value::as_str).unwrap_or("");
            b_key.cmp(a_key)
        });
        Ok(docs)
    }

    async fn query_any_of(
        &self,
        collection: &str,
        field: &str,
        values: &[String],
    ) -> Result<Vec<Document>> {
        self.record_call();
        self.check_read()?;
        if values.len() > ANY_OF_LIMIT {
            return Err(AppError::Remote(format!(
                "any-of filter supports at most {} values, got {}",
                ANY_OF_LIMIT,
                values.len()
            )));
        }
        let inner = self.inner.lock().unwrap();
        let docs = inner
            .docs
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| {
                        fields
                            .get(field)
                            .and_then(Value::as_array)
                            .map(|items| {
                                items
                                    .iter()
                                    .filter_map(Value::as_str)
                                    .any(|item| values.iter().any(|v| v == item))
                            })
                            .unwrap_or(false)
                    })
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                        create_time: None,
                        update_time: None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn increment(&self, collection: &str, id: &str, field: &str, by: i64) -> Result<()> {
        self.record_call();
        self.check_write()?;
        let mut inner = self.inner.lock().unwrap();
        let docs = inner
            .docs
            .get_mut(collection)
            .ok_or_else(|| AppError::Remote("missing collection".to_string()))?;
        let (_, fields) = docs
            .iter_mut()
            .find(|(doc_id, _)| doc_id == id)
            .ok_or_else(|| AppError::Remote("missing document".to_string()))?;
        let current = fields.get(field).and_then(Value::as_i64).unwrap_or(0);
        fields.insert(field.to_string(), json!(current + by));
        Ok(())
    }

    async fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<()> {
        self.record_call();
        self.check_write()?;
        let mut inner = self.inner.lock().unwrap();
        let docs = inner
            .docs
            .get_mut(collection)
            .ok_or_else(|| AppError::Remote("missing collection".to_string()))?;
        let (_, fields) = docs
            .iter_mut()
            .find(|(doc_id, _)| doc_id == id)
            .ok_or_else(|| AppError::Remote("missing document".to_string()))?;
        let mut current = fields
            .get(field)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for value in values {
            if !current.contains(&value) {
                current.push(value);
            }
        }
        fields.insert(field.to_string(), Value::Array(current));
        Ok(())
    }

    async fn patch(&self, collection: &str, id: &str, updates: Map<String, Value>) -> Result<()> {
        self.record_call();
        self.check_write()?;
        let mut inner = self.inner.lock().unwrap();
        let docs = inner.docs.entry(collection.to_string()).or_default();
        if let Some((_, fields)) = docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            for (key, value) in updates {
                fields.insert(key, value);
            }
        } else {
            docs.push((id.to_string(), updates));
        }
        Ok(())
    }
}

/// In-memory blob store; uploads succeed with a deterministic URL unless
/// failure is toggled on.
#[derive(Default)]
pub struct MemoryBlobs {
    uploads: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn uploaded_paths(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobs {
    async fn upload(&self, path: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Remote("simulated upload failure".to_string()));
        }
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(format!("https://blobs.test/{}", path))
    }

    async fn download_url(&self, path: &str) -> Result<String> {
        Ok(format!("https://blobs.test/{}", path))
    }
}

/// Fixed-identity auth provider.
#[derive(Default)]
pub struct StaticAuth {
    user: Mutex<Option<CurrentUser>>,
}

impl StaticAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: CurrentUser) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    fn user_for(email: &str) -> CurrentUser {
        let local = email.split('@').next().unwrap_or(email);
        CurrentUser {
            id: format!("uid-{}", local),
            display_name: None,
            email: email.to_string(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn create_account(&self, email: &str, _password: &str) -> Result<CurrentUser> {
        let user = Self::user_for(email);
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<CurrentUser> {
        let user = Self::user_for(email);
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    fn sign_out(&self) {
        *self.user.lock().unwrap() = None;
    }

    fn current_user(&self) -> Option<CurrentUser> {
        self.user.lock().unwrap().clone()
    }
}

pub fn maker(display_name: Option<&str>) -> CurrentUser {
    CurrentUser {
        id: "uid-maker".to_string(),
        display_name: display_name.map(str::to_string),
        email: "maker@example.com".to_string(),
    }
}
