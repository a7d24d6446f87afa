//! Session-related types.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long the post-login celebration banner stays visible.
const CELEBRATION_WINDOW_SECS: i64 = 3;

/// The login record stored under the `auth` key.
///
/// Its presence is the sole session-validity signal: the guard checks for
/// the record and nothing else. Logout removes it; nothing expires it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMarker {
    /// Display name of the logged-in visitor.
    pub name: String,
    /// When the login happened.
    pub logged_in_at: DateTime<Utc>,
}

impl SessionMarker {
    /// Create a marker for a login happening now.
    #[must_use]
    pub fn begin(name: String) -> Self {
        Self {
            name,
            logged_in_at: Utc::now(),
        }
    }

    /// The login time formatted for display on the dashboard.
    #[must_use]
    pub fn login_time(&self) -> String {
        self.logged_in_at
            .format("%b %-d, %Y, %-I:%M:%S %p UTC")
            .to_string()
    }

    /// Whether `now` still falls inside the celebration window after login.
    #[must_use]
    pub fn celebration_active(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.logged_in_at)
            < chrono::Duration::seconds(CELEBRATION_WINDOW_SECS)
    }
}
