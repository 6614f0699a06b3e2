/// Cloud Storage client (REST)
///
/// Uploads image blobs under caller-chosen paths and resolves stable
/// download URLs for them.
use serde::Deserialize;
use tracing::debug;

use crate::config::FirebaseConfig;
use crate::error::{FirebaseError, Result};
use crate::{current_token, SessionStore};

const STORAGE_BASE: &str = "https://firebasestorage.googleapis.com/v0";

#[derive(Debug, Deserialize)]
struct ObjectMetadata {
    #[serde(default, rename = "downloadTokens")]
    download_tokens: String,
}

#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    config: FirebaseConfig,
    session: SessionStore,
}

impl StorageClient {
    pub fn new(http: reqwest::Client, config: FirebaseConfig, session: SessionStore) -> Self {
        Self {
            http,
            config,
            session,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/b/{}/o/{}",
            STORAGE_BASE,
            self.config.storage_bucket,
            urlencoding::encode(path)
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match current_token(&self.session) {
            Some(token) => request.header("Authorization", format!("Firebase {token}")),
            None => request,
        }
    }

    /// Upload a binary payload and return its download URL.
    pub async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let url = format!(
            "{}/b/{}/o?uploadType=media&name={}",
            STORAGE_BASE,
            self.config.storage_bucket,
            urlencoding::encode(path)
        );
        let response = self
            .authorize(
                self.http
                    .post(&url)
                    .header("Content-Type", content_type.to_string())
                    .body(bytes),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FirebaseError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let metadata: ObjectMetadata = response.json().await?;
        debug!(%path, "blob uploaded");
        Ok(self.url_with_token(path, &metadata))
    }

    /// Resolve the stable download URL for an already-uploaded object.
    pub async fn download_url(&self, path: &str) -> Result<String> {
        let response = self
            .authorize(self.http.get(self.object_url(path)))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FirebaseError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let metadata: ObjectMetadata = response.json().await?;
        Ok(self.url_with_token(path, &metadata))
    }

    fn url_with_token(&self, path: &str, metadata: &ObjectMetadata) -> String {
        let token = metadata
            .download_tokens
            .split(',')
            .next()
            .unwrap_or_default();
        if token.is_empty() {
            format!("{}?alt=media", self.object_url(path))
        } else {
            format!("{}?alt=media&token={}", self.object_url(path), token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_session_store;

    #[test]
    fn object_paths_are_url_encoded() {
        let client = StorageClient::new(
            reqwest::Client::new(),
            FirebaseConfig {
                api_key: "key".into(),
                project_id: "demo".into(),
                storage_bucket: "demo.firebasestorage.app".into(),
            },
            new_session_store(),
        );
        let url = client.object_url("images/uid-1/1700000000000");
        assert_eq!(
            url,
            "https://firebasestorage.googleapis.com/v0/b/demo.firebasestorage.app/o/images%2Fuid-1%2F1700000000000"
        );
    }
}
