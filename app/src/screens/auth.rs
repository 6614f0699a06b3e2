/// Sign-in / sign-up screen
///
/// One form serves both modes, toggled by `sign_up`. Validation runs
/// locally before any provider call; provider failures surface as the
/// same inline error string the validation path uses.
use std::sync::Arc;

use firebase_client::CurrentUser;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::services::AuthService;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MIN_PASSWORD_LEN: usize = 6;

pub struct AuthScreen {
    auth: Arc<AuthService>,
    pub email: String,
    pub password: String,
    pub sign_up: bool,
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthScreen {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self {
            auth,
            email: String::new(),
            password: String::new(),
            sign_up: false,
            error: None,
            loading: false,
        }
    }

    /// Switch between sign-in and sign-up, clearing any stale error.
    pub fn toggle_mode(&mut self) {
        self.sign_up = !self.sign_up;
        self.error = None;
    }

    /// Submit the form. Returns the signed-in user on success; on any
    /// failure the inline error is set and `None` comes back.
    pub async fn submit(&mut self) -> Option<CurrentUser> {
        self.error = None;
        if let Some(message) = self.validate() {
            self.error = Some(message);
            return None;
        }

        self.loading = true;
        let email = self.email.trim().to_string();
        let result = if self.sign_up {
            self.auth.sign_up(&email, &self.password).await
        } else {
            self.auth.sign_in(&email, &self.password).await
        };
        self.loading = false;

        match result {
            Ok(user) => {
                self.password.clear();
                Some(user)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    fn validate(&self) -> Option<String> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Some("Please fill in all fields".to_string());
        }
        if !EMAIL_RE.is_match(email) {
            return Some("Please enter a valid email address".to_string());
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Some("Password must be at least 6 characters long".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MockBlobStore, MockDocumentStore};
    use crate::services::auth::MockAuthProvider;

    fn screen() -> AuthScreen {
        // A provider with no expectations panics if the screen reaches it.
        let auth = AuthService::new(
            Arc::new(MockAuthProvider::new()),
            Arc::new(MockDocumentStore::new()),
            Arc::new(MockBlobStore::new()),
        );
        AuthScreen::new(Arc::new(auth))
    }

    #[tokio::test]
    async fn empty_fields_fail_before_any_provider_call() {
        let mut screen = screen();
        assert!(screen.submit().await.is_none());
        assert_eq!(screen.error.as_deref(), Some("Please fill in all fields"));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected_locally() {
        let mut screen = screen();
        screen.email = "not-an-email".into();
        screen.password = "secret1".into();
        assert!(screen.submit().await.is_none());
        assert_eq!(
            screen.error.as_deref(),
            Some("Please enter a valid email address")
        );
    }

    #[tokio::test]
    async fn short_password_is_rejected_locally() {
        let mut screen = screen();
        screen.email = "maker@example.com".into();
        screen.password = "abc".into();
        assert!(screen.submit().await.is_none());
        assert_eq!(
            screen.error.as_deref(),
            Some("Password must be at least 6 characters long")
        );
    }

    #[test]
    fn email_pattern_accepts_ordinary_addresses() {
        assert!(EMAIL_RE.is_match("maker@example.com"));
        assert!(!EMAIL_RE.is_match("maker@example"));
        assert!(!EMAIL_RE.is_match("maker example@example.com"));
    }
}
