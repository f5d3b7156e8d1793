//! Request and session types for the auth flows. Passwords live in
//! `SecretString` so they never reach `Debug` output or logs; the HTTP client
//! exposes them only while building the request body.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Normalizes emails for stable account identifiers and API requests.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sign-in input handed to the session store, then dropped.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: normalize_email(email),
            password: SecretString::from(password.to_string()),
        }
    }
}

/// Account creation input; same lifecycle as [`Credentials`].
#[derive(Clone, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub password: SecretString,
}

impl SignupRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: normalize_email(email),
            password: SecretString::from(password.to_string()),
        }
    }
}

/// Password reset input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetRequest {
    pub email: String,
}

impl ResetRequest {
    pub fn new(email: &str) -> Self {
        Self {
            email: normalize_email(email),
        }
    }
}

/// Reference to the signed-in user as returned by the identity API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserRef {
    /// Text shown in the header and the "already signed in" panel.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// Snapshot of the session store. Controllers only ever see copies of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_user: Option<UserRef>,
    pub signing_in: bool,
    pub signing_up: bool,
    pub resetting_password: bool,
    pub error: Option<String>,
    /// Set once the initial session lookup finished, successfully or not.
    pub hydrated: bool,
}

impl SessionState {
    pub fn operation_in_flight(&self) -> bool {
        self.signing_in || self.signing_up || self.resetting_password
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}
