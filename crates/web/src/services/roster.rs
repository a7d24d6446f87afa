//! In-memory roster management.
//!
//! Rosters are the dashboard's working data: ordered sequences of
//! [`DirectoryEntry`] values held in process memory, one per visitor. The
//! visitor's session stores only a [`RosterId`] handle; the data itself is
//! never written to the key-value store and disappears when the process
//! stops.

use std::collections::HashMap;

use tokio::sync::RwLock;

use user_directory_core::{EntryId, RosterId};

use crate::models::DirectoryEntry;

/// An ordered sequence of directory entries.
///
/// Operations preserve sequence semantics: add appends at the end, edit
/// replaces in place, delete removes and shifts later entries down one
/// position.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<DirectoryEntry>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry at the end of the sequence.
    pub fn add(&mut self, entry: DirectoryEntry) {
        self.entries.push(entry);
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replace the entry carrying `updated.id` in place.
    ///
    /// The position of every entry is unchanged. Returns `false` if no
    /// entry has that id.
    pub fn replace(&mut self, updated: DirectoryEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with the given id.
    ///
    /// Later entries shift down one position. Returns `false` if no entry
    /// has that id.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    /// Entries whose name contains `term`, case-insensitively.
    ///
    /// An empty term matches everything. The underlying sequence is never
    /// mutated by a search.
    #[must_use]
    pub fn filter(&self, term: &str) -> Vec<DirectoryEntry> {
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Process-wide registry of per-visitor rosters.
///
/// Handlers never hold the lock across an await; every operation takes the
/// guard, works on the map, and releases it.
///
/// TODO: evict a roster when its owning session expires (needs an expiry
/// hook from the session layer).
#[derive(Debug, Default)]
pub struct RosterService {
    rosters: RwLock<HashMap<RosterId, Roster>>,
}

impl RosterService {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh empty roster and return its handle.
    pub async fn create(&self) -> RosterId {
        let id = RosterId::generate();
        self.rosters.write().await.insert(id, Roster::new());
        id
    }

    /// A point-in-time copy of a roster.
    ///
    /// An unknown handle (e.g. a session that outlived a process restart)
    /// reads as an empty roster.
    pub async fn snapshot(&self, id: RosterId) -> Roster {
        self.rosters.read().await.get(&id).cloned().unwrap_or_default()
    }

    /// Look up a single entry.
    pub async fn entry(&self, id: RosterId, entry_id: EntryId) -> Option<DirectoryEntry> {
        self.rosters
            .read()
            .await
            .get(&id)
            .and_then(|roster| roster.get(entry_id).cloned())
    }

    /// Append an entry to a roster.
    ///
    /// An unknown handle gets a fresh roster, so a stale session heals
    /// itself on the next add.
    pub async fn add_entry(&self, id: RosterId, entry: DirectoryEntry) {
        self.rosters
            .write()
            .await
            .entry(id)
            .or_default()
            .add(entry);
    }

    /// Replace an entry in place. Returns `false` if the entry is unknown.
    pub async fn update_entry(&self, id: RosterId, updated: DirectoryEntry) -> bool {
        self.rosters
            .write()
            .await
            .get_mut(&id)
            .is_some_and(|roster| roster.replace(updated))
    }

    /// Remove an entry. Returns `false` if the entry is unknown.
    pub async fn remove_entry(&self, id: RosterId, entry_id: EntryId) -> bool {
        self.rosters
            .write()
            .await
            .get_mut(&id)
            .is_some_and(|roster| roster.remove(entry_id))
    }
}
