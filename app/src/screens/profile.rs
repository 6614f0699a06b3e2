/// Profile screen
///
/// Shows the signed-in user's profile document and lets them edit the
/// username and profile image, or sign out. A missing profile document
/// renders as empty fields rather than an error.
use std::sync::Arc;

use tracing::warn;

use crate::models::User;
use crate::services::{AuthService, ImageAttachment};

pub struct ProfileScreen {
    auth: Arc<AuthService>,
    pub profile: Option<User>,
    pub username_input: String,
    pub error: Option<String>,
}

impl ProfileScreen {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self {
            auth,
            profile: None,
            username_input: String::new(),
            error: None,
        }
    }

    /// Fetch the profile document for the signed-in user.
    pub async fn load(&mut self) {
        self.error = None;
        match self.auth.profile().await {
            Ok(profile) => {
                if let Some(profile) = &profile {
                    self.username_input = profile.username.clone();
                }
                self.profile = profile;
            }
            Err(err) => {
                warn!("profile fetch failed: {}", err);
                self.error = Some("Failed to load profile".to_string());
            }
        }
    }

    /// Save the edited username and refresh the local copy.
    pub async fn save_username(&mut self) {
        self.error = None;
        let username = self.username_input.clone();
        match self.auth.update_username(&username).await {
            Ok(()) => {
                if let Some(profile) = &mut self.profile {
                    profile.username = username.trim().to_string();
                }
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Upload a new profile image and record its URL on the profile.
    pub async fn change_image(&mut self, image: ImageAttachment) {
        self.error = None;
        match self.auth.set_profile_image(&image).await {
            Ok(url) => {
                if let Some(profile) = &mut self.profile {
                    profile.profile_image_url = Some(url);
                }
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn sign_out(&mut self) {
        self.auth.sign_out();
        self.profile = None;
        self.username_input.clear();
    }
}
