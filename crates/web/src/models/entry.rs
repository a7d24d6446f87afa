//! Directory entry record.

use user_directory_core::{Email, EntryId, Phone};

/// One row in the dashboard's roster.
///
/// Entries live only in process memory and carry a generated id so that
/// edit and delete address a stable identity rather than a list position.
/// No field is unique - two entries may share a name, email, or phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Stable generated identifier.
    pub id: EntryId,
    /// Display name; the search filter matches against this field.
    pub name: String,
    /// Contact email address.
    pub email: Email,
    /// Contact phone number (at most 10 characters).
    pub phone: Phone,
    /// Attached photo as a base64 data URL, if one was uploaded.
    pub image: Option<String>,
}

impl DirectoryEntry {
    /// Create a new entry with a freshly generated id.
    #[must_use]
    pub fn new(name: String, email: Email, phone: Phone, image: Option<String>) -> Self {
        Self {
            id: EntryId::generate(),
            name,
            email,
            phone,
            image,
        }
    }
}
