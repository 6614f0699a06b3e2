use chrono::{DateTime, Utc};
use firebase_client::Document;
use serde::{Deserialize, Serialize};

use super::{optional_str, required_str, timestamp};
use crate::error::Result;

/// A user profile document, keyed by the authentication id.
///
/// One exists for every identity after its first sign-up; its absence is
/// tolerated (profile features degrade) but never auto-repaired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub profile_image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn from_document(doc: &Document) -> Result<User> {
        let fields = &doc.fields;
        let email = required_str(fields, "email")?;
        Ok(User {
            id: doc.id.clone(),
            username: optional_str(fields, "username")
                .unwrap_or_else(|| Self::default_username(&email)),
            email,
            profile_image_url: optional_str(fields, "profileImageUrl"),
            created_at: timestamp(fields, "createdAt").or(doc.create_time),
        })
    }

    /// Default username at account creation: the local part of the email.
    pub fn default_username(email: &str) -> String {
        email.split('@').next().unwrap_or(email).to_string()
    }
}
