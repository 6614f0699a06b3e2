use serde_json::{json, Map};

use super::{DocumentStore, USERS};
use crate::error::Result;
use crate::models::User;

/// Write the profile document for a freshly created account.
///
/// The username defaults to the local part of the email; the document is
/// keyed by the auth id, so this is a keyed set rather than an auto-id
/// create. `createdAt` is assigned by the server, same as post documents.
pub async fn create_profile(store: &dyn DocumentStore, user_id: &str, email: &str) -> Result<()> {
    let mut fields = Map::new();
    fields.insert("email".into(), json!(email));
    fields.insert("username".into(), json!(User::default_username(email)));
    store.set(USERS, user_id, fields, &["createdAt"]).await
}

/// Fetch a profile document; `None` when it was never created.
pub async fn get_profile(store: &dyn DocumentStore, user_id: &str) -> Result<Option<User>> {
    match store.get(USERS, user_id).await? {
        Some(doc) => Ok(Some(User::from_document(&doc)?)),
        None => Ok(None),
    }
}

/// Change the editable username.
pub async fn update_username(
    store: &dyn DocumentStore,
    user_id: &str,
    username: &str,
) -> Result<()> {
    let mut fields = Map::new();
    fields.insert("username".into(), json!(username));
    store.patch(USERS, user_id, fields).await
}

/// Record the profile image URL after an upload.
pub async fn set_profile_image(
    store: &dyn DocumentStore,
    user_id: &str,
    url: &str,
) -> Result<()> {
    let mut fields = Map::new();
    fields.insert("profileImageUrl".into(), json!(url));
    store.patch(USERS, user_id, fields).await
}
