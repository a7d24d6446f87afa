//! Typed access to the per-visitor key-value store.
//!
//! The store holds three JSON-encoded records in the visitor's session:
//!
//! - [`keys::USER`] - the signup record ([`UserAccount`])
//! - [`keys::AUTH`] - the login marker ([`SessionMarker`])
//! - [`keys::ROSTER_ID`] - handle linking the visitor to their in-memory
//!   roster ([`RosterId`])
//!
//! Every read goes through typed deserialization; a malformed stored value
//! surfaces as [`StoreError::Corrupt`] instead of an unhandled fault.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use user_directory_core::RosterId;

use crate::models::{SessionMarker, UserAccount};

/// Store keys for the per-visitor records.
pub mod keys {
    /// Key for the signup record.
    pub const USER: &str = "user";

    /// Key for the login marker.
    pub const AUTH: &str = "auth";

    /// Key for the visitor's roster handle.
    pub const ROSTER_ID: &str = "roster_id";
}

/// Errors raised by store access.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored value under a key failed to deserialize into its record
    /// type.
    #[error("stored record under key {key:?} is corrupt: {source}")]
    Corrupt {
        /// The key whose value is malformed.
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The session backend failed.
    #[error("session store error: {0}")]
    Backend(#[from] tower_sessions::session_store::Error),
}

/// Typed accessor over a visitor's session.
///
/// Each read and write is a single atomic session operation; there is no
/// transactional grouping across keys.
pub struct VisitorStore<'a> {
    session: &'a Session,
}

impl<'a> VisitorStore<'a> {
    /// Wrap a session in a typed store accessor.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Load the signup record, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is malformed.
    pub async fn load_account(&self) -> Result<Option<UserAccount>, StoreError> {
        self.get(keys::USER).await
    }

    /// Persist the signup record, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn save_account(&self, account: &UserAccount) -> Result<(), StoreError> {
        self.insert(keys::USER, account).await
    }

    /// Load the login marker, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is malformed.
    pub async fn load_marker(&self) -> Result<Option<SessionMarker>, StoreError> {
        self.get(keys::AUTH).await
    }

    /// Persist the login marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_marker(&self, marker: &SessionMarker) -> Result<(), StoreError> {
        self.insert(keys::AUTH, marker).await
    }

    /// Remove the login marker (logout).
    ///
    /// Removes the raw value, so a corrupt marker can still be cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn clear_marker(&self) -> Result<(), StoreError> {
        self.session
            .remove::<serde_json::Value>(keys::AUTH)
            .await
            .map_err(|e| classify(keys::AUTH, e))?;
        Ok(())
    }

    /// Load the visitor's roster handle, if one has been assigned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is malformed.
    pub async fn roster_id(&self) -> Result<Option<RosterId>, StoreError> {
        self.get(keys::ROSTER_ID).await
    }

    /// Persist the visitor's roster handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_roster_id(&self, id: RosterId) -> Result<(), StoreError> {
        self.insert(keys::ROSTER_ID, &id).await
    }

    async fn get<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, StoreError> {
        self.session.get(key).await.map_err(|e| classify(key, e))
    }

    async fn insert<T: Serialize + ?Sized>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), StoreError> {
        self.session
            .insert(key, value)
            .await
            .map_err(|e| classify(key, e))
    }
}

/// Split a session error into the corrupt-record and backend cases.
fn classify(key: &'static str, err: SessionError) -> StoreError {
    match err {
        SessionError::SerdeJson(source) => StoreError::Corrupt { key, source },
        SessionError::Store(source) => StoreError::Backend(source),
    }
}
