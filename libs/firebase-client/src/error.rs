use thiserror::Error;

pub type Result<T> = std::result::Result<T, FirebaseError>;

/// Authentication failure classes reported by the identity endpoints.
///
/// Each code maps to a fixed user-facing message; unrecognized API codes
/// collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WrongPassword,
    UserNotFound,
    Other,
}

impl AuthErrorCode {
    /// Classify a raw identitytoolkit error code.
    pub fn from_api_code(code: &str) -> Self {
        match code {
            "EMAIL_EXISTS" => AuthErrorCode::EmailAlreadyInUse,
            "INVALID_EMAIL" => AuthErrorCode::InvalidEmail,
            // Newer API versions collapse wrong-password into
            // INVALID_LOGIN_CREDENTIALS.
            "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => AuthErrorCode::WrongPassword,
            "EMAIL_NOT_FOUND" => AuthErrorCode::UserNotFound,
            _ => AuthErrorCode::Other,
        }
    }

    /// Fixed user-facing message for this class.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthErrorCode::EmailAlreadyInUse => "Email is already registered",
            AuthErrorCode::InvalidEmail => "Invalid email address",
            AuthErrorCode::WrongPassword => "Incorrect password",
            AuthErrorCode::UserNotFound => "No account found with this email",
            AuthErrorCode::Other => "Authentication failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum FirebaseError {
    #[error("{}", .0.user_message())]
    Auth(AuthErrorCode),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("any-of filter supports at most {limit} values, got {got}")]
    FilterLimit { limit: usize, got: usize },
}

impl From<reqwest::Error> for FirebaseError {
    fn from(err: reqwest::Error) -> Self {
        FirebaseError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FirebaseError {
    fn from(err: serde_json::Error) -> Self {
        FirebaseError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_fixed_messages() {
        assert_eq!(
            AuthErrorCode::from_api_code("EMAIL_EXISTS").user_message(),
            "Email is already registered"
        );
        assert_eq!(
            AuthErrorCode::from_api_code("INVALID_EMAIL").user_message(),
            "Invalid email address"
        );
        assert_eq!(
            AuthErrorCode::from_api_code("INVALID_PASSWORD").user_message(),
            "Incorrect password"
        );
        assert_eq!(
            AuthErrorCode::from_api_code("EMAIL_NOT_FOUND").user_message(),
            "No account found with this email"
        );
    }

    #[test]
    fn unknown_codes_fall_back_to_generic_message() {
        assert_eq!(
            AuthErrorCode::from_api_code("TOO_MANY_ATTEMPTS_TRY_LATER").user_message(),
            "Authentication failed"
        );
    }
}
