/// Firebase project configuration
///
/// Loaded from environment variables; the API key and project id are
/// required, the storage bucket defaults to the project's default bucket.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Web API key used for the identitytoolkit endpoints
    pub api_key: String,
    /// Firestore project id
    pub project_id: String,
    /// Cloud Storage bucket name
    pub storage_bucket: String,
}

impl FirebaseConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("FIREBASE_API_KEY")
            .map_err(|_| "FIREBASE_API_KEY must be set".to_string())?;
        let project_id = std::env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| "FIREBASE_PROJECT_ID must be set".to_string())?;
        let storage_bucket = std::env::var("FIREBASE_STORAGE_BUCKET")
            .unwrap_or_else(|_| format!("{}.firebasestorage.app", project_id));

        Ok(FirebaseConfig {
            api_key,
            project_id,
            storage_bucket,
        })
    }
}
