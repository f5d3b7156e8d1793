//! HTTP implementation of [`AuthBackend`] against the identity API. Sessions
//! are cookie based; the `HttpOnly` cookie never reaches this code. Request
//! bodies carry passwords and must never be logged.

use crate::{
    app_lib::api::{
        get_optional_json_with_credentials, post_empty_with_credentials, post_json,
        post_json_with_credentials_response,
    },
    features::auth::{
        error::AuthError,
        store::AuthBackend,
        types::{Credentials, ResetRequest, SignupRequest, UserRef},
    },
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;

const LOGIN_PATH: &str = "/v1/auth/login";
const SIGNUP_PATH: &str = "/v1/auth/signup";
const RESET_PATH: &str = "/v1/auth/password/reset";
const SESSION_PATH: &str = "/v1/auth/session";
const LOGOUT_PATH: &str = "/v1/auth/logout";

/// Wire body for login and signup; borrows the secret only while encoding.
#[derive(Serialize)]
struct PasswordBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HttpBackend;

#[async_trait(?Send)]
impl AuthBackend for HttpBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserRef, AuthError> {
        let body = PasswordBody {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };
        Ok(post_json_with_credentials_response(LOGIN_PATH, &body).await?)
    }

    async fn sign_up(&self, request: &SignupRequest) -> Result<(), AuthError> {
        let body = PasswordBody {
            email: &request.email,
            password: request.password.expose_secret(),
        };
        Ok(post_json(SIGNUP_PATH, &body).await?)
    }

    /// The API answers 204 whether or not the account exists.
    async fn reset_password(&self, request: &ResetRequest) -> Result<(), AuthError> {
        Ok(post_json(RESET_PATH, request).await?)
    }

    async fn current_user(&self) -> Result<Option<UserRef>, AuthError> {
        Ok(get_optional_json_with_credentials(SESSION_PATH).await?)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(post_empty_with_credentials(LOGOUT_PATH).await?)
    }
}
