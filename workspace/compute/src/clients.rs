//! Client roster derived from a counselor's bookings, with private notes.

use std::collections::HashMap;
use tracing::{debug, warn};

use model::{Booking, ClientNotes, NoteStore, NoteStoreError, User};

/// One client and their sessions, in the order the bookings were fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSessions {
    pub client: User,
    pub sessions: Vec<Booking>,
}

/// Clients in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientRoster {
    entries: Vec<ClientSessions>,
    index: HashMap<String, usize>,
}

impl ClientRoster {
    pub fn entries(&self) -> &[ClientSessions] {
        &self.entries
    }

    pub fn get(&self, client_id: &str) -> Option<&ClientSessions> {
        self.index.get(client_id).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, client: &User, booking: &Booking) {
        match self.index.get(&client.id) {
            Some(&i) => self.entries[i].sessions.push(booking.clone()),
            None => {
                self.index.insert(client.id.clone(), self.entries.len());
                self.entries.push(ClientSessions {
                    client: client.clone(),
                    sessions: vec![booking.clone()],
                });
            }
        }
    }
}

/// Groups bookings by their embedded client. Bookings without a client are
/// skipped; session order is the input order.
pub fn group_by_client(bookings: &[Booking]) -> ClientRoster {
    let mut roster = ClientRoster::default();
    for booking in bookings {
        match &booking.user {
            Some(client) => roster.push(client, booking),
            None => debug!("Booking {} has no client, skipping", booking.id),
        }
    }
    roster
}

/// Notes of every client, persisted whole on each change.
pub struct ClientNotebook<S: NoteStore> {
    store: S,
    notes: ClientNotes,
}

impl<S: NoteStore> ClientNotebook<S> {
    pub fn open(store: S) -> Result<Self, NoteStoreError> {
        let notes = store.load()?;
        Ok(Self { store, notes })
    }

    /// Like [`ClientNotebook::open`], but an unreadable payload starts an
    /// empty notebook.
    pub fn open_or_empty(store: S) -> Self {
        let notes = store.load().unwrap_or_else(|err| {
            warn!("Ignoring stored client notes: {}", err);
            ClientNotes::new()
        });
        Self { store, notes }
    }

    /// Note text for a client, empty when none was written.
    pub fn note_for(&self, client_id: &str) -> &str {
        self.notes.get(client_id).map(String::as_str).unwrap_or("")
    }

    pub fn set_note(&mut self, client_id: &str, text: &str) -> Result<(), NoteStoreError> {
        self.notes.insert(client_id.to_string(), text.to_string());
        self.store.save(&self.notes)
    }

    pub fn notes(&self) -> &ClientNotes {
        &self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::fetch_bookings;
    use crate::testing::seeded_store;
    use model::MemoryNoteStore;

    fn ids(bookings: &[Booking]) -> Vec<&str> {
        bookings.iter().map(|b| b.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_sessions_keep_fetch_order() {
        let store = seeded_store();
        let bookings = fetch_bookings(&store, "c1").await.unwrap();
        let roster = group_by_client(&bookings);

        assert_eq!(roster.len(), 2);
        let aki = roster.get("u1").unwrap();
        assert_eq!(ids(&aki.sessions), vec!["b3", "b1"]);
        assert_eq!(roster.entries()[0].client.id, "u1");
        assert_eq!(roster.entries()[1].client.display_name(), "ben@example.com");
    }

    #[tokio::test]
    async fn test_each_client_booking_in_exactly_one_list() {
        let store = seeded_store();
        let bookings = fetch_bookings(&store, "c1").await.unwrap();
        let roster = group_by_client(&bookings);

        let grouped: usize = roster.entries().iter().map(|e| e.sessions.len()).sum();
        let with_client = bookings.iter().filter(|b| b.user.is_some()).count();
        assert_eq!(grouped, with_client);
        assert!(roster.get("u-deleted").is_none());
    }

    #[test]
    fn test_empty_bookings_empty_roster() {
        assert!(group_by_client(&[]).is_empty());
    }

    #[test]
    fn test_notebook_persists_whole_map() {
        let store = MemoryNoteStore::new();
        let mut notebook = ClientNotebook::open(&store).unwrap();
        assert_eq!(notebook.note_for("u1"), "");

        notebook.set_note("u1", "prefers evenings").unwrap();
        notebook.set_note("u2", "referred by u1").unwrap();
        assert_eq!(store.writes(), 2);

        let reopened = ClientNotebook::open(&store).unwrap();
        assert_eq!(reopened.note_for("u1"), "prefers evenings");
        assert_eq!(reopened.notes().len(), 2);
    }

    #[test]
    fn test_corrupt_notes_open_empty() {
        let store = MemoryNoteStore::with_payload("{broken");
        assert!(ClientNotebook::open(&store).is_err());

        let notebook = ClientNotebook::open_or_empty(&store);
        assert!(notebook.notes().is_empty());
    }
}
