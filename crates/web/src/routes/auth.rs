//! Authentication route handlers.
//!
//! Handles the signup, login, and logout flows. Validation failures render
//! inline on the page that produced them, with the submitted values
//! retained; only server faults reach the application error type.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::services::{AuthError, AuthService};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for success display after a redirect.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
    pub password: String,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(marker): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let success = query
        .success
        .filter(|code| code == "registered")
        .map(|_| "User registered successfully".to_string());

    LoginTemplate {
        logged_in: marker.is_some(),
        error: None,
        success,
        email: String::new(),
        password: String::new(),
    }
}

/// Handle login form submission.
///
/// On success writes the login marker and redirects to the dashboard; on a
/// validation failure re-renders the page with the submitted values
/// retained.
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Result<Response> {
    match AuthService::new(&session)
        .log_in(&form.email, &form.password)
        .await
    {
        Ok(marker) => {
            tracing::info!(name = %marker.name, "login succeeded");
            Ok(Redirect::to("/home").into_response())
        }
        Err(err) if err.is_form_error() => {
            tracing::debug!("login rejected: {err}");
            Ok(LoginTemplate {
                logged_in: false,
                error: Some(err.to_string()),
                success: None,
                email: form.email,
                password: form.password,
            }
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(OptionalAuth(marker): OptionalAuth) -> impl IntoResponse {
    SignupTemplate {
        logged_in: marker.is_some(),
        error: None,
        name: String::new(),
        email: String::new(),
        password: String::new(),
    }
}

/// Handle signup form submission.
///
/// Persists the account (silently overwriting any previous signup) and
/// redirects to the login page with a success notification.
pub async fn signup(session: Session, Form(form): Form<SignupForm>) -> Result<Response> {
    match AuthService::new(&session)
        .sign_up(&form.name, &form.email, &form.password)
        .await
    {
        Ok(account) => {
            tracing::info!(email = %account.email, "signup succeeded");
            Ok(Redirect::to("/login?success=registered").into_response())
        }
        Err(err @ AuthError::MissingFields(_)) => {
            tracing::debug!("signup rejected: {err}");
            Ok(SignupTemplate {
                logged_in: false,
                error: Some(err.to_string()),
                name: form.name,
                email: form.email,
                password: form.password,
            }
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Removes the login marker and redirects to the login page. The signup
/// record stays in place.
pub async fn logout(session: Session) -> Result<Response> {
    AuthService::new(&session).log_out().await?;

    Ok(Redirect::to("/login").into_response())
}
