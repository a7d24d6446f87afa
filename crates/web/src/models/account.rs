//! Signup account record.

use serde::{Deserialize, Serialize};

/// The signup record stored under the `user` key.
///
/// Exactly one account exists per visitor store - signing up again silently
/// overwrites the previous record. The password is stored as an Argon2id
/// hash, never as plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Display name shown on the dashboard after login.
    pub name: String,
    /// Email address used as the login identifier.
    pub email: String,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
}
