/// Image upload flow
///
/// Blob paths are namespaced by user id; post images additionally carry
/// the upload's epoch-millisecond timestamp, making each upload path
/// unique per upload rather than per post. The storage path is kept next
/// to the URL on the owning document so a future cleanup could find the
/// blob again.
use chrono::Utc;
use tracing::info;

use crate::db::BlobStore;
use crate::error::{AppError, Result};

/// A local image ready for upload.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// The result of a successful upload: the stable download URL plus the
/// storage path it lives under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
    pub path: String,
}

/// Upload a post image.
///
/// Both an authenticated user id and an image must be present; otherwise
/// the flow fails before any remote call and the caller must abort post
/// creation. Upload failures are fatal for the dependent operation; there
/// is no retry.
pub async fn upload_post_image(
    blobs: &dyn BlobStore,
    user_id: Option<&str>,
    image: Option<&ImageAttachment>,
) -> Result<UploadedImage> {
    let (Some(user_id), Some(image)) = (user_id, image) else {
        return Err(AppError::Precondition(
            "No user or image to upload".to_string(),
        ));
    };

    let path = format!("images/{}/{}", user_id, Utc::now().timestamp_millis());
    let url = blobs
        .upload(&path, image.bytes.clone(), &image.content_type)
        .await
        .map_err(as_upload_error)?;

    info!(%path, "post image uploaded");
    Ok(UploadedImage { url, path })
}

/// Upload a profile image; one path per user, overwritten on change.
pub async fn upload_profile_image(
    blobs: &dyn BlobStore,
    user_id: &str,
    image: &ImageAttachment,
) -> Result<String> {
    let path = format!("profileImages/{}", user_id);
    blobs
        .upload(&path, image.bytes.clone(), &image.content_type)
        .await
        .map_err(as_upload_error)
}

fn as_upload_error(err: AppError) -> AppError {
    match err {
        AppError::Remote(message) => AppError::Upload(message),
        other => other,
    }
}
