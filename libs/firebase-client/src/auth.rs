/// Firebase Authentication client (identitytoolkit REST)
///
/// Issues sessions for email/password identities and exposes the current
/// identity to the rest of the app through the shared session store.
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::config::FirebaseConfig;
use crate::error::{AuthErrorCode, FirebaseError, Result};
use crate::SessionStore;

const IDENTITY_BASE: &str = "https://identitytoolkit.googleapis.com/v1";

/// A signed-in session as returned by the identity endpoints.
#[derive(Debug, Clone)]
pub struct Session {
    pub local_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
}

/// The identity view the rest of the app works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: String,
}

impl From<&Session> for CurrentUser {
    fn from(session: &Session) -> Self {
        CurrentUser {
            id: session.local_id.clone(),
            display_name: session.display_name.clone(),
            email: session.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    config: FirebaseConfig,
    session: SessionStore,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, config: FirebaseConfig, session: SessionStore) -> Self {
        Self {
            http,
            config,
            session,
        }
    }

    /// Create a new email/password account and start a session for it.
    pub async fn create_account(&self, email: &str, password: &str) -> Result<CurrentUser> {
        self.token_request("accounts:signUp", email, password).await
    }

    /// Sign in to an existing account.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser> {
        self.token_request("accounts:signInWithPassword", email, password)
            .await
    }

    /// Clear the current session.
    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.session.write() {
            if let Some(session) = guard.take() {
                info!(user_id = %session.local_id, "signed out");
            }
        }
    }

    /// The currently signed-in identity, if any.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.session
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(CurrentUser::from))
    }

    async fn token_request(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser> {
        let url = format!(
            "{}/{}?key={}",
            IDENTITY_BASE, endpoint, self.config.api_key
        );
        let response = self
            .http
            .post(&url)
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let code = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_default();
            warn!(%status, %code, "authentication request rejected");
            // Codes may carry a suffix like "EMAIL_EXISTS : ...".
            let code = code.split_whitespace().next().unwrap_or("");
            return Err(FirebaseError::Auth(AuthErrorCode::from_api_code(code)));
        }

        let body: SignInResponse = response.json().await?;
        let session = Session {
            local_id: body.local_id,
            email: body.email,
            display_name: body.display_name,
            id_token: body.id_token,
            refresh_token: body.refresh_token,
        };
        let user = CurrentUser::from(&session);

        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
        info!(user_id = %user.id, "session established");

        Ok(user)
    }
}
