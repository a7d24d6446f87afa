//! Authentication error types.

use thiserror::Error;

use super::MissingFields;
use crate::store::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more required form fields were left empty.
    #[error("{0}")]
    MissingFields(MissingFields),

    /// Submitted credentials do not match the stored account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Login was attempted before any signup.
    #[error("No account found. Please sign up.")]
    AccountNotFound,

    /// Store access failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether this error should be shown inline on the form that caused it.
    ///
    /// Store and hashing failures are server faults and are handled by the
    /// application error type instead.
    #[must_use]
    pub const fn is_form_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields(_) | Self::InvalidCredentials | Self::AccountNotFound
        )
    }
}
