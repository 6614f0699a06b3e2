/// Shared Firebase REST clients for the Crafty app
///
/// Provides typed access to the three external services the app depends on:
/// Firebase Authentication (email/password identities), the Firestore
/// document collection, and Cloud Storage for image blobs. All wire-level
/// behavior lives here; callers see plain Rust types and typed errors.
use std::sync::{Arc, RwLock};

pub mod auth;
pub mod config;
pub mod error;
pub mod firestore;
pub mod storage;
pub mod value;

pub use auth::{AuthClient, CurrentUser, Session};
pub use config::FirebaseConfig;
pub use error::{AuthErrorCode, FirebaseError, Result};
pub use firestore::{FirestoreClient, ANY_OF_LIMIT};
pub use storage::StorageClient;
pub use value::Document;

/// Shared handle to the currently signed-in identity.
///
/// The auth client writes it on sign-in/sign-out; the Firestore and Storage
/// clients read the ID token from it per request. Requests issued with no
/// session are sent unauthenticated.
pub type SessionStore = Arc<RwLock<Option<Session>>>;

/// Create an empty session store to share across clients.
pub fn new_session_store() -> SessionStore {
    Arc::new(RwLock::new(None))
}

/// Read the current ID token, if a session is active.
pub(crate) fn current_token(store: &SessionStore) -> Option<String> {
    store
        .read()
        .ok()
        .and_then(|guard| guard.as_ref().map(|s| s.id_token.clone()))
}
