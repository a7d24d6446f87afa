//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Redirect dispatcher (auth -> /home, else /login)
//!
//! # Auth
//! GET  /login                     - Login page
//! POST /login                     - Login action
//! GET  /signup                    - Signup page
//! POST /signup                    - Signup action
//! POST /logout                    - Logout action
//!
//! # Dashboard (requires auth)
//! GET  /home                      - Dashboard (search via ?q=)
//! GET  /home/entries/new          - Dashboard with an empty entry form
//! POST /home/entries              - Create an entry (multipart)
//! GET  /home/entries/{id}/edit    - Dashboard with a pre-filled entry form
//! POST /home/entries/{id}         - Update an entry (multipart)
//! POST /home/entries/{id}/delete  - Delete an entry
//! ```

pub mod auth;
pub mod dashboard;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Redirect dispatcher for the root path.
///
/// Visitors with a login marker land on the dashboard; everyone else is
/// sent to the login page.
async fn index(OptionalAuth(marker): OptionalAuth) -> Redirect {
    match marker {
        Some(_) => Redirect::to("/home"),
        None => Redirect::to("/login"),
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(dashboard::show))
        .route("/home/entries", post(dashboard::create_entry))
        .route("/home/entries/new", get(dashboard::new_entry_form))
        .route("/home/entries/{id}", post(dashboard::update_entry))
        .route("/home/entries/{id}/edit", get(dashboard::edit_entry_form))
        .route("/home/entries/{id}/delete", post(dashboard::delete_entry))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .merge(auth_routes())
        .merge(dashboard_routes())
}
