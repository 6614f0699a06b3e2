/// Post service
///
/// Validates composer input, runs the image upload before the document
/// write, and exposes the feed and search entry points. Like and comment
/// writes go straight to the repository; the optimistic presentation of
/// those writes lives with the feed screen.
use std::sync::Arc;

use firebase_client::CurrentUser;
use tracing::info;

use crate::db::{post_repo, BlobStore, DocumentStore};
use crate::error::{AppError, Result};
use crate::models::{Post, ANONYMOUS_AUTHOR, ANONYMOUS_COMMENTER};
use crate::search;
use crate::services::uploads::{self, ImageAttachment};

pub struct PostService {
    docs: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl PostService {
    pub fn new(docs: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { docs, blobs }
    }

    /// Create a post from composer input.
    ///
    /// The description is trimmed and must be non-empty; materials are
    /// trimmed and blank entries dropped, with at least one surviving.
    /// When an image is attached its upload runs first and any failure
    /// aborts the whole flow, so no post document ever references a blob
    /// that was not written.
    pub async fn create_post(
        &self,
        author: Option<&CurrentUser>,
        description: &str,
        materials: &[String],
        image: Option<&ImageAttachment>,
    ) -> Result<String> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "Please enter a description".to_string(),
            ));
        }

        let materials: Vec<String> = materials
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        if materials.is_empty() {
            return Err(AppError::Validation(
                "Please add at least one material".to_string(),
            ));
        }

        let author = author.ok_or_else(|| {
            AppError::Precondition("Please log in to create a post".to_string())
        })?;

        let uploaded = match image {
            Some(image) => Some(
                uploads::upload_post_image(self.blobs.as_ref(), Some(&author.id), Some(image))
                    .await?,
            ),
            None => None,
        };

        let username = author.display_name.as_deref().unwrap_or(ANONYMOUS_AUTHOR);
        let post_id = post_repo::create_post(
            self.docs.as_ref(),
            description,
            &author.id,
            username,
            &materials,
            uploaded
                .as_ref()
                .map(|img| (img.url.as_str(), img.path.as_str())),
        )
        .await?;

        info!(%post_id, "post created");
        Ok(post_id)
    }

    /// The whole feed, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        post_repo::list_posts(self.docs.as_ref()).await
    }

    /// Record one like for a post.
    pub async fn like_post(&self, post_id: &str) -> Result<()> {
        post_repo::like_post(self.docs.as_ref(), post_id).await
    }

    /// Append a comment and return the stored form.
    ///
    /// The body is trimmed; an empty body is a validation error. The
    /// commenter's display name falls back to the anonymous label.
    pub async fn add_comment(
        &self,
        post_id: &str,
        display_name: Option<&str>,
        body: &str,
    ) -> Result<String> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }
        let name = display_name.unwrap_or(ANONYMOUS_COMMENTER);
        let comment = Post::format_comment(name, body);
        post_repo::add_comment(self.docs.as_ref(), post_id, &comment).await?;
        Ok(comment)
    }

    /// Tag search with AND semantics over the selected materials.
    pub async fn search_by_materials(&self, selected: &[String]) -> Result<Vec<Post>> {
        search::search_by_materials(self.docs.as_ref(), selected).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MockBlobStore, MockDocumentStore};

    fn user(display_name: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: "uid-1".into(),
            display_name: display_name.map(str::to_string),
            email: "maker@example.com".into(),
        }
    }

    fn service(docs: MockDocumentStore, blobs: MockBlobStore) -> PostService {
        PostService::new(Arc::new(docs), Arc::new(blobs))
    }

    #[tokio::test]
    async fn rejects_blank_description_before_any_remote_call() {
        let svc = service(MockDocumentStore::new(), MockBlobStore::new());
        let err = svc
            .create_post(Some(&user(None)), "   ", &["Paper".into()], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_materials_that_trim_to_nothing() {
        let svc = service(MockDocumentStore::new(), MockBlobStore::new());
        let err = svc
            .create_post(Some(&user(None)), "desc", &["  ".into(), "".into()], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn requires_a_signed_in_author() {
        let svc = service(MockDocumentStore::new(), MockBlobStore::new());
        let err = svc
            .create_post(None, "desc", &["Paper".into()], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[tokio::test]
    async fn stores_trimmed_fields_and_anonymous_author() {
        let mut docs = MockDocumentStore::new();
        docs.expect_create()
            .withf(|collection, fields, server_timestamps| {
                collection == "posts"
                    && fields["description"] == "desc"
                    && fields["username"] == ANONYMOUS_AUTHOR
                    && fields["materials"] == serde_json::json!(["Paper"])
                    && fields["likes"] == 0
                    && server_timestamps == ["createdAt", "updatedAt"]
            })
            .returning(|_, _, _| Ok("post-1".to_string()));

        let svc = service(docs, MockBlobStore::new());
        let id = svc
            .create_post(Some(&user(None)), "  desc  ", &[" Paper ".into()], None)
            .await
            .unwrap();
        assert_eq!(id, "post-1");
    }

    #[tokio::test]
    async fn upload_failure_aborts_the_post_write() {
        let docs = MockDocumentStore::new();
        let mut blobs = MockBlobStore::new();
        blobs
            .expect_upload()
            .returning(|_, _, _| Err(AppError::Remote("boom".into())));

        let svc = service(docs, blobs);
        let image = ImageAttachment {
            bytes: vec![1, 2, 3],
            content_type: "image/jpeg".into(),
        };
        let err = svc
            .create_post(Some(&user(None)), "desc", &["Paper".into()], Some(&image))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upload(_)));
    }

    #[tokio::test]
    async fn formats_and_stores_comments() {
        let mut docs = MockDocumentStore::new();
        docs.expect_array_append()
            .withf(|collection, id, field, values| {
                collection == "posts"
                    && id == "post-1"
                    && field == "comments"
                    && values.as_slice() == [serde_json::json!("Alice: nice idea")]
            })
            .returning(|_, _, _, _| Ok(()));

        let svc = service(docs, MockBlobStore::new());
        let stored = svc
            .add_comment("post-1", Some("Alice"), "  nice idea ")
            .await
            .unwrap();
        assert_eq!(stored, "Alice: nice idea");
    }

    #[tokio::test]
    async fn empty_comment_is_rejected() {
        let svc = service(MockDocumentStore::new(), MockBlobStore::new());
        let err = svc.add_comment("post-1", Some("Alice"), " ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
