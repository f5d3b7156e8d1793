//! Layout components shared across routes.

mod app_shell;
mod auth_card;
mod protected_layout;
mod public_layout;

pub(crate) use app_shell::AppShell;
pub(crate) use auth_card::AuthCard;
pub(crate) use protected_layout::ProtectedLayout;
pub(crate) use public_layout::PublicLayout;
