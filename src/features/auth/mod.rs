//! Auth feature module: form validation, the observable session store, and
//! the login, registration, and password reset flow controllers. It keeps
//! authentication logic out of the UI and must avoid logging passwords or
//! session material.
//!
//! Flow Overview: controllers validate locally, call the store, and react to
//! the snapshots it publishes. The store delegates to an [`store::AuthBackend`]
//! (HTTP in the browser, a scripted double in tests). Views mirror the store
//! into a Leptos signal through `state::AuthProvider`.

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) mod client;
mod controller;
pub(crate) mod error;
#[cfg(target_arch = "wasm32")]
mod guards;
pub(crate) mod login;
pub(crate) mod register;
pub(crate) mod reset;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
pub(crate) mod store;
#[cfg(test)]
mod test_support;
pub(crate) mod types;
pub(crate) mod validation;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::RequireAuth;
