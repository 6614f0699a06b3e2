/// Post composer screen
///
/// Holds the draft post: description, a growable list of material rows
/// (always at least one row, possibly blank) and an optional image
/// attachment. Submission delegates validation to the service and resets
/// the draft only on success.
use std::sync::Arc;

use firebase_client::CurrentUser;

use crate::services::{ImageAttachment, PostService};

pub struct ComposerScreen {
    posts: Arc<PostService>,
    pub description: String,
    pub materials: Vec<String>,
    pub image: Option<ImageAttachment>,
    pub error: Option<String>,
    pub submitting: bool,
}

impl ComposerScreen {
    pub fn new(posts: Arc<PostService>) -> Self {
        Self {
            posts,
            description: String::new(),
            materials: vec![String::new()],
            image: None,
            error: None,
            submitting: false,
        }
    }

    pub fn add_material_row(&mut self) {
        self.materials.push(String::new());
    }

    pub fn update_material(&mut self, index: usize, value: &str) {
        if let Some(slot) = self.materials.get_mut(index) {
            *slot = value.to_string();
        }
    }

    /// Remove a material row; the last remaining row stays put.
    pub fn remove_material_row(&mut self, index: usize) {
        if self.materials.len() > 1 && index < self.materials.len() {
            self.materials.remove(index);
        }
    }

    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Submit the draft. On success the draft resets and the new post id
    /// comes back; on failure the inline error is set and the draft is
    /// left intact for another attempt.
    pub async fn submit(&mut self, author: Option<&CurrentUser>) -> Option<String> {
        self.error = None;
        self.submitting = true;
        let result = self
            .posts
            .create_post(
                author,
                &self.description,
                &self.materials,
                self.image.as_ref(),
            )
            .await;
        self.submitting = false;

        match result {
            Ok(post_id) => {
                self.reset();
                Some(post_id)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    fn reset(&mut self) {
        self.description.clear();
        self.materials = vec![String::new()];
        self.image = None;
    }
}
