//! Dashboard route handlers.
//!
//! The dashboard is the protected view: a welcome card with the login time
//! (plus a short-lived celebration banner right after login), a search box,
//! the roster grid, and the entry form used for both add and edit. Roster
//! data lives in process memory; the session only carries the handle.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use user_directory_core::{Email, EntryId, Phone, RosterId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{DirectoryEntry, SessionMarker};
use crate::services::Roster;
use crate::state::AppState;
use crate::store::VisitorStore;

// =============================================================================
// Query and Form Types
// =============================================================================

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive name filter.
    pub q: Option<String>,
}

/// Entry form data, decoded from a multipart submission.
#[derive(Debug, Default)]
struct EntryForm {
    name: String,
    email: String,
    phone: String,
    /// Uploaded photo already encoded as a data URL, if a file was chosen.
    image: Option<String>,
}

impl EntryForm {
    /// Validate the submitted values the way the entry form's inputs do:
    /// all three fields required, email structurally valid, phone capped at
    /// 10 characters.
    fn validate(&self) -> std::result::Result<(Email, Phone), String> {
        if self.name.is_empty() {
            return Err("Please enter a name".to_string());
        }
        if self.email.is_empty() {
            return Err("Please enter an email address".to_string());
        }
        if self.phone.is_empty() {
            return Err("Please enter a phone number".to_string());
        }
        let email = Email::parse(&self.email).map_err(|e| e.to_string())?;
        let phone = Phone::parse(&self.phone).map_err(|e| e.to_string())?;
        Ok((email, phone))
    }
}

// =============================================================================
// Templates
// =============================================================================

/// One roster card.
pub struct EntryView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub image: Option<String>,
}

impl From<&DirectoryEntry> for EntryView {
    fn from(entry: &DirectoryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.clone(),
            email: entry.email.to_string(),
            phone: entry.phone.to_string(),
            image: entry.image.clone(),
        }
    }
}

/// The entry form modal, in add or edit mode.
pub struct EntryFormView {
    /// Where the form posts to.
    pub action: String,
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl EntryFormView {
    fn add() -> Self {
        Self {
            action: "/home/entries".to_string(),
            heading: "Add User Details",
            submit_label: "Submit",
            error: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }

    fn edit(entry: &DirectoryEntry) -> Self {
        Self {
            action: format!("/home/entries/{}", entry.id),
            heading: "Edit User Details",
            submit_label: "Update",
            error: None,
            name: entry.name.clone(),
            email: entry.email.to_string(),
            phone: entry.phone.to_string(),
        }
    }

    /// Rebuild the form from a rejected submission, keeping the entered
    /// values.
    fn rejected(mut self, form: &EntryForm, message: String) -> Self {
        self.error = Some(message);
        self.name = form.name.clone();
        self.email = form.email.clone();
        self.phone = form.phone.clone();
        self
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/home.html")]
pub struct HomeTemplate {
    pub logged_in: bool,
    pub name: String,
    pub login_time: String,
    pub celebrate: bool,
    pub search_term: String,
    pub entries: Vec<EntryView>,
    pub form: Option<EntryFormView>,
}

impl HomeTemplate {
    fn build(marker: &SessionMarker, roster: &Roster, term: &str, form: Option<EntryFormView>) -> Self {
        Self {
            logged_in: true,
            name: marker.name.clone(),
            login_time: marker.login_time(),
            celebrate: marker.celebration_active(Utc::now()),
            search_term: term.to_string(),
            entries: roster.filter(term).iter().map(EntryView::from).collect(),
            form,
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the visitor's roster snapshot, empty if none has been created yet.
async fn load_roster(state: &AppState, session: &Session) -> Result<Roster> {
    let roster = match VisitorStore::new(session).roster_id().await? {
        Some(id) => state.rosters().snapshot(id).await,
        None => Roster::new(),
    };
    Ok(roster)
}

/// Get the visitor's roster handle, allocating one on first use.
async fn ensure_roster_id(state: &AppState, session: &Session) -> Result<RosterId> {
    let store = VisitorStore::new(session);
    if let Some(id) = store.roster_id().await? {
        return Ok(id);
    }
    let id = state.rosters().create().await;
    store.set_roster_id(id).await?;
    Ok(id)
}

// =============================================================================
// Dashboard Routes
// =============================================================================

/// Display the dashboard.
pub async fn show(
    RequireAuth(marker): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    session: Session,
) -> Result<Response> {
    let roster = load_roster(&state, &session).await?;
    let term = query.q.unwrap_or_default();

    Ok(HomeTemplate::build(&marker, &roster, &term, None).into_response())
}

/// Display the dashboard with an empty entry form open.
pub async fn new_entry_form(
    RequireAuth(marker): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response> {
    let roster = load_roster(&state, &session).await?;

    Ok(HomeTemplate::build(&marker, &roster, "", Some(EntryFormView::add())).into_response())
}

/// Display the dashboard with the entry form pre-filled for editing.
pub async fn edit_entry_form(
    RequireAuth(marker): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
    session: Session,
) -> Result<Response> {
    let roster = load_roster(&state, &session).await?;
    let entry = roster
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("entry {id}")))?;
    let form = EntryFormView::edit(entry);

    Ok(HomeTemplate::build(&marker, &roster, "", Some(form)).into_response())
}

/// Create an entry from a multipart form submission.
pub async fn create_entry(
    RequireAuth(marker): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_entry_form(multipart).await?;

    let (email, phone) = match form.validate() {
        Ok(parsed) => parsed,
        Err(message) => {
            let roster = load_roster(&state, &session).await?;
            let view = EntryFormView::add().rejected(&form, message);
            return Ok(HomeTemplate::build(&marker, &roster, "", Some(view)).into_response());
        }
    };

    let roster_id = ensure_roster_id(&state, &session).await?;
    let entry = DirectoryEntry::new(form.name, email, phone, form.image);
    state.rosters().add_entry(roster_id, entry).await;

    Ok(Redirect::to("/home").into_response())
}

/// Update an entry in place from a multipart form submission.
///
/// Submitting without choosing a new photo keeps the existing one.
pub async fn update_entry(
    RequireAuth(marker): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
    session: Session,
    multipart: Multipart,
) -> Result<Response> {
    let roster_id = VisitorStore::new(&session)
        .roster_id()
        .await?
        .ok_or_else(|| AppError::NotFound(format!("entry {id}")))?;
    let existing = state
        .rosters()
        .entry(roster_id, id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("entry {id}")))?;

    let form = read_entry_form(multipart).await?;

    let (email, phone) = match form.validate() {
        Ok(parsed) => parsed,
        Err(message) => {
            let roster = load_roster(&state, &session).await?;
            let view = EntryFormView::edit(&existing).rejected(&form, message);
            return Ok(HomeTemplate::build(&marker, &roster, "", Some(view)).into_response());
        }
    };

    let updated = DirectoryEntry {
        id,
        name: form.name,
        email,
        phone,
        image: form.image.or(existing.image),
    };
    state.rosters().update_entry(roster_id, updated).await;

    Ok(Redirect::to("/home").into_response())
}

/// Delete an entry.
///
/// Later entries shift down one position; deleting an unknown entry is a
/// no-op.
pub async fn delete_entry(
    RequireAuth(_marker): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
    session: Session,
) -> Result<Response> {
    if let Some(roster_id) = VisitorStore::new(&session).roster_id().await? {
        state.rosters().remove_entry(roster_id, id).await;
    }

    Ok(Redirect::to("/home").into_response())
}

// =============================================================================
// Multipart Decoding
// =============================================================================

/// Decode the entry form fields from a multipart body.
///
/// A chosen photo is read fully and embedded as a `data:` URL; an empty
/// file part (no file selected) leaves the image unset.
async fn read_entry_form(mut multipart: Multipart) -> Result<EntryForm> {
    let mut form = EntryForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = read_text(field).await?,
            "email" => form.email = read_text(field).await?,
            "phone" => form.phone = read_text(field).await?,
            "photo" => {
                let content_type = field
                    .content_type()
                    .map_or_else(|| "application/octet-stream".to_string(), ToOwned::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid photo upload: {e}")))?;
                if !data.is_empty() {
                    form.image = Some(format!(
                        "data:{content_type};base64,{}",
                        BASE64.encode(&data)
                    ));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Read a text field from a multipart part.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid form field: {e}")))
}
