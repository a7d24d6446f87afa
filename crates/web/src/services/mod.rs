//! Application services.

pub mod auth;
pub mod roster;

pub use auth::{AuthError, AuthService, MissingFields};
pub use roster::{Roster, RosterService};
