use crate::app_lib::AppError;
use thiserror::Error;

/// Failures reported by the session store. The `Display` text is what the
/// store publishes as the user-facing error banner.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Another request is already in progress.")]
    Busy,
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Transport(AppError),
}

impl From<AppError> for AuthError {
    /// Client errors (4xx) carry a message meant for the user; everything else
    /// is a transport or server problem.
    fn from(err: AppError) -> Self {
        match err {
            AppError::Http { status, message } if (400..500).contains(&status) => {
                AuthError::Rejected(message)
            }
            other => AuthError::Transport(other),
        }
    }
}
