/// Data access layer
///
/// `store` holds the seams to the remote document collection and blob
/// store; the repositories translate domain operations into store calls.
pub mod post_repo;
pub mod store;
pub mod user_repo;

pub use store::{BlobStore, DocumentStore};

#[cfg(test)]
pub use store::{MockBlobStore, MockDocumentStore};

/// Collection of post documents.
pub const POSTS: &str = "posts";

/// Collection of user profile documents, keyed by auth id.
pub const USERS: &str = "users";
