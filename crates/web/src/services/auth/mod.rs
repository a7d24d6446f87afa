//! Authentication service.
//!
//! One service owns the whole signup/login/logout contract against the
//! per-visitor store. Validation is presence-only with a fixed message
//! priority; credentials are checked by email equality plus Argon2id
//! password verification against the stored hash.

mod error;

pub use error::AuthError;

use core::fmt;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tower_sessions::Session;

use crate::models::{SessionMarker, UserAccount};
use crate::store::VisitorStore;

/// Which required fields a submitted form left empty.
///
/// Only the highest-priority case is reported: a fully empty form gets the
/// combined message, otherwise the first missing field in name, email,
/// password order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFields {
    /// Signup submitted with every field empty.
    NameEmailPassword,
    /// Login submitted with every field empty.
    EmailPassword,
    /// Name empty.
    Name,
    /// Email empty.
    Email,
    /// Password empty.
    Password,
}

impl MissingFields {
    /// Check a signup submission. Returns `None` when all fields are present.
    #[must_use]
    pub fn check_signup(name: &str, email: &str, password: &str) -> Option<Self> {
        match (name.is_empty(), email.is_empty(), password.is_empty()) {
            (true, true, true) => Some(Self::NameEmailPassword),
            (true, _, _) => Some(Self::Name),
            (_, true, _) => Some(Self::Email),
            (_, _, true) => Some(Self::Password),
            (false, false, false) => None,
        }
    }

    /// Check a login submission. Returns `None` when all fields are present.
    #[must_use]
    pub fn check_login(email: &str, password: &str) -> Option<Self> {
        match (email.is_empty(), password.is_empty()) {
            (true, true) => Some(Self::EmailPassword),
            (true, false) => Some(Self::Email),
            (false, true) => Some(Self::Password),
            (false, false) => None,
        }
    }

    /// The message shown inline on the form.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NameEmailPassword => "Please enter your name, email, and password",
            Self::EmailPassword => "Please enter your email address and password",
            Self::Name => "Please enter your name",
            Self::Email => "Please enter your email address",
            Self::Password => "Please enter your password",
        }
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Authentication service over a visitor's store.
pub struct AuthService<'a> {
    store: VisitorStore<'a>,
}

impl<'a> AuthService<'a> {
    /// Create an authentication service for the given session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self {
            store: VisitorStore::new(session),
        }
    }

    /// Register an account with name, email, and password.
    ///
    /// Overwrites any previously stored account - the store is
    /// single-tenant by design.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is empty; nothing is
    /// written in that case. Returns `AuthError::PasswordHash` or
    /// `AuthError::Store` on server faults.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, AuthError> {
        if let Some(missing) = MissingFields::check_signup(name, email, password) {
            return Err(AuthError::MissingFields(missing));
        }

        let account = UserAccount {
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: hash_password(password)?,
        };
        self.store.save_account(&account).await?;

        Ok(account)
    }

    /// Log in with email and password.
    ///
    /// On success, writes the login marker and returns it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if a field is empty,
    /// `AuthError::AccountNotFound` if no signup preceded the login, and
    /// `AuthError::InvalidCredentials` on any mismatch. No marker is
    /// written on failure.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<SessionMarker, AuthError> {
        if let Some(missing) = MissingFields::check_login(email, password) {
            return Err(AuthError::MissingFields(missing));
        }

        let account = self
            .store
            .load_account()
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if account.email != email {
            return Err(AuthError::InvalidCredentials);
        }
        verify_password(password, &account.password_hash)?;

        let marker = SessionMarker::begin(account.name);
        self.store.set_marker(&marker).await?;

        Ok(marker)
    }

    /// Log out by removing the login marker.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session cannot be modified.
    pub async fn log_out(&self) -> Result<(), AuthError> {
        self.store.clear_marker().await?;
        Ok(())
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
