use firebase_client::FirebaseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Application error taxonomy.
///
/// Every failure degrades to a user-visible message; nothing here is
/// process-fatal. Validation and precondition errors are raised before any
/// remote call; remote and upload errors are raised at the call site after
/// optimistic state has been reverted.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any remote call; the message is user-facing
    #[error("{0}")]
    Validation(String),

    /// A required precondition (signed-in user, attached image) is missing
    #[error("{0}")]
    Precondition(String),

    /// Authentication failed with a fixed user-facing message
    #[error("{0}")]
    Auth(String),

    /// A remote call failed (network, permission, not-found)
    #[error("Remote error: {0}")]
    Remote(String),

    /// Image upload failed; the dependent operation must be aborted
    #[error("Upload failed: {0}")]
    Upload(String),

    /// A remote document did not match the expected shape
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Object detection failed (model load or inference)
    #[error("Detection error: {0}")]
    Detection(String),
}

impl From<FirebaseError> for AppError {
    fn from(err: FirebaseError) -> Self {
        match err {
            FirebaseError::Auth(code) => AppError::Auth(code.user_message().to_string()),
            other => AppError::Remote(other.to_string()),
        }
    }
}
