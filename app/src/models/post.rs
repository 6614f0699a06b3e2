use chrono::{DateTime, Utc};
use firebase_client::Document;
use serde::{Deserialize, Serialize};

use super::{int_or, optional_str, required_str, string_array, timestamp};
use crate::error::Result;

/// Fallback author name when the identity carries no display name.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous User";

/// Fallback commenter name.
pub const ANONYMOUS_COMMENTER: &str = "Anonymous";

/// A community post: a reuse idea for packaging materials.
///
/// `username` is a snapshot of the author's display name at creation time
/// and is not kept in sync with later edits. `likes` only ever increments
/// and `comments` is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub description: String,
    pub user_id: String,
    pub username: String,
    pub materials: Vec<String>,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub likes: i64,
    pub comments: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Parse a remote document into a typed post.
    ///
    /// `description` and `userId` are required; everything else defaults.
    /// The image URL and storage path are only meaningful together, so a
    /// document carrying just one of them is normalized to neither.
    pub fn from_document(doc: &Document) -> Result<Post> {
        let fields = &doc.fields;

        let mut image_url = optional_str(fields, "imageUrl");
        let mut image_path = optional_str(fields, "imagePath");
        if image_url.is_none() || image_path.is_none() {
            image_url = None;
            image_path = None;
        }

        Ok(Post {
            id: doc.id.clone(),
            description: required_str(fields, "description")?,
            user_id: required_str(fields, "userId")?,
            username: optional_str(fields, "username")
                .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
            materials: string_array(fields, "materials"),
            image_url,
            image_path,
            likes: int_or(fields, "likes", 0),
            comments: string_array(fields, "comments"),
            created_at: timestamp(fields, "createdAt").or(doc.create_time),
            updated_at: timestamp(fields, "updatedAt").or(doc.update_time),
        })
    }

    /// Format a comment the way it is stored on the post document.
    pub fn format_comment(display_name: &str, body: &str) -> String {
        format!("{}: {}", display_name, body)
    }
}
