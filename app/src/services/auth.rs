/// Authentication service
///
/// Wraps the external authentication provider and keeps the profile
/// document in step with the account lifecycle: the first sign-up writes a
/// `users/{uid}` document with a username derived from the email. A missing
/// profile document degrades profile features but is never auto-repaired.
use std::sync::Arc;

use async_trait::async_trait;
use firebase_client::{AuthClient, CurrentUser};
use tracing::warn;

#[cfg(test)]
use mockall::automock;

use crate::db::{user_repo, BlobStore, DocumentStore};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::uploads::{self, ImageAttachment};

/// The external authentication provider (spec'd identity operations only).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> Result<CurrentUser>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser>;
    fn sign_out(&self);
    fn current_user(&self) -> Option<CurrentUser>;
}

#[async_trait]
impl AuthProvider for AuthClient {
    async fn create_account(&self, email: &str, password: &str) -> Result<CurrentUser> {
        Ok(AuthClient::create_account(self, email, password).await?)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser> {
        Ok(AuthClient::sign_in(self, email, password).await?)
    }

    fn sign_out(&self) {
        AuthClient::sign_out(self)
    }

    fn current_user(&self) -> Option<CurrentUser> {
        AuthClient::current_user(self)
    }
}

pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    docs: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl AuthService {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        docs: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            provider,
            docs,
            blobs,
        }
    }

    /// Create an account and its profile document.
    ///
    /// A failed profile write does not fail the sign-up; the account
    /// exists either way and profile features simply degrade.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<CurrentUser> {
        let user = self.provider.create_account(email, password).await?;
        if let Err(err) = user_repo::create_profile(self.docs.as_ref(), &user.id, email).await {
            warn!(user_id = %user.id, "profile document write failed: {}", err);
        }
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser> {
        self.provider.sign_in(email, password).await
    }

    pub fn sign_out(&self) {
        self.provider.sign_out()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.provider.current_user()
    }

    /// The signed-in user's profile document, if it exists.
    pub async fn profile(&self) -> Result<Option<User>> {
        match self.current_user() {
            Some(user) => user_repo::get_profile(self.docs.as_ref(), &user.id).await,
            None => Ok(None),
        }
    }

    /// Change the editable username on the profile document.
    ///
    /// Post documents keep their creation-time username snapshot; they are
    /// deliberately not rewritten.
    pub async fn update_username(&self, username: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }
        let user = self
            .current_user()
            .ok_or_else(|| AppError::Precondition("Please log in to edit your profile".into()))?;
        user_repo::update_username(self.docs.as_ref(), &user.id, username).await
    }

    /// Upload a new profile image and record its URL.
    pub async fn set_profile_image(&self, image: &ImageAttachment) -> Result<String> {
        let user = self
            .current_user()
            .ok_or_else(|| AppError::Precondition("Please log in to edit your profile".into()))?;
        let url = uploads::upload_profile_image(self.blobs.as_ref(), &user.id, image).await?;
        user_repo::set_profile_image(self.docs.as_ref(), &user.id, &url).await?;
        Ok(url)
    }
}
