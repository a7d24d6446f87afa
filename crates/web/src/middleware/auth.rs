//! Session guard extractors.
//!
//! Provides extractors gating protected views on the presence of the login
//! marker in the visitor's store.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::SessionMarker;
use crate::store::{StoreError, VisitorStore};

/// Extractor that requires a logged-in visitor.
///
/// If no login marker is present, the request is redirected to the login
/// page before any content is rendered. A corrupt marker is logged and
/// treated the same way - logging in again overwrites it.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(marker): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Welcome, {}!", marker.name)
/// }
/// ```
pub struct RequireAuth(pub SessionMarker);

/// Rejection returned when the login marker is absent.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(AuthRejection)?;

        let marker = load_marker(session).await.ok_or(AuthRejection)?;

        Ok(Self(marker))
    }
}

/// Extractor that optionally gets the login marker.
///
/// Unlike `RequireAuth`, this never rejects; the navigation bar and root
/// dispatcher use it to branch on session presence.
pub struct OptionalAuth(pub Option<SessionMarker>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let marker = match parts.extensions.get::<Session>() {
            Some(session) => load_marker(session).await,
            None => None,
        };

        Ok(Self(marker))
    }
}

/// Read the login marker, mapping a corrupt record to "not logged in".
async fn load_marker(session: &Session) -> Option<SessionMarker> {
    match VisitorStore::new(session).load_marker().await {
        Ok(marker) => marker,
        Err(err @ StoreError::Corrupt { .. }) => {
            tracing::warn!("Login marker unreadable, treating as logged out: {err}");
            None
        }
        Err(err) => {
            tracing::error!("Failed to read login marker: {err}");
            None
        }
    }
}
