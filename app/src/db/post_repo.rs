use serde_json::{json, Map, Value};
use tracing::warn;

use super::{DocumentStore, POSTS};
use crate::error::Result;
use crate::models::Post;

/// Write a new post document.
///
/// Input is assumed validated (non-empty description, at least one
/// material); `createdAt`/`updatedAt` are assigned by the server.
/// Returns the new post id.
pub async fn create_post(
    store: &dyn DocumentStore,
    description: &str,
    user_id: &str,
    username: &str,
    materials: &[String],
    image: Option<(&str, &str)>,
) -> Result<String> {
    let mut fields = Map::new();
    fields.insert("description".into(), json!(description));
    fields.insert("userId".into(), json!(user_id));
    fields.insert("username".into(), json!(username));
    fields.insert("materials".into(), json!(materials));
    fields.insert("likes".into(), json!(0));
    fields.insert("comments".into(), json!([]));
    if let Some((url, path)) = image {
        fields.insert("imageUrl".into(), json!(url));
        fields.insert("imagePath".into(), json!(path));
    }

    store
        .create(POSTS, fields, &["createdAt", "updatedAt"])
        .await
}

/// Fetch all posts, newest first. No pagination, no limit.
///
/// Documents that fail the parsing boundary are skipped with a warning
/// rather than failing the whole fetch.
pub async fn list_posts(store: &dyn DocumentStore) -> Result<Vec<Post>> {
    let documents = store.list_ordered_desc(POSTS, "createdAt").await?;
    Ok(parse_posts(documents))
}

/// Increment a post's like counter by exactly 1.
pub async fn like_post(store: &dyn DocumentStore, post_id: &str) -> Result<()> {
    store.increment(POSTS, post_id, "likes", 1).await
}

/// Append one formatted comment to a post.
pub async fn add_comment(store: &dyn DocumentStore, post_id: &str, comment: &str) -> Result<()> {
    store
        .array_append(POSTS, post_id, "comments", vec![json!(comment)])
        .await
}

/// Broad any-of query: posts whose materials intersect `tags`.
///
/// OR semantics only; callers needing AND semantics refine the result
/// locally (see the search engine).
pub async fn find_by_any_material(
    store: &dyn DocumentStore,
    tags: &[String],
) -> Result<Vec<Post>> {
    let documents = store.query_any_of(POSTS, "materials", tags).await?;
    Ok(parse_posts(documents))
}

fn parse_posts(documents: Vec<firebase_client::Document>) -> Vec<Post> {
    documents
        .iter()
        .filter_map(|doc| match Post::from_document(doc) {
            Ok(post) => Some(post),
            Err(err) => {
                warn!(post_id = %doc.id, "skipping malformed post document: {}", err);
                None
            }
        })
        .collect()
}
