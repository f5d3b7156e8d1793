//! Shared frontend utilities for API access, configuration, errors, logging,
//! and build metadata.
//!
//! ## Core Authentication Flows
//!
//! ### Sign-in
//!
//! 1. **Submit:** The login page validates the form locally and asks the session
//!    store to sign in; the store POSTs to `/v1/auth/login` with cookies enabled.
//! 2. **Settle:** The server sets an `HttpOnly` session cookie and returns the
//!    user. The store publishes the new session to every subscriber.
//! 3. **Navigate:** The login controller reacts to the published session and
//!    navigates to the configured landing page.
//!
//! ### Password Reset
//!
//! The reset page POSTs the email to `/v1/auth/password/reset`. The API answers
//! 204 whether or not the account exists, and the page switches to a "check your
//! email" confirmation.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. Callers must avoid logging
//! credentials.

// Only the browser views reach the modules marked below.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) mod api;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod logging;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) mod theme;

pub(crate) use errors::AppError;
