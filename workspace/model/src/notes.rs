//! Private per-client notes kept by a counselor.
//!
//! Notes never reach the remote store. They live in local key-value storage
//! under a single key holding the whole map, so a save always rewrites every
//! note at once and the last writer wins.

use std::cell::RefCell;
use std::collections::BTreeMap;
use thiserror::Error;

/// Storage key holding the serialized notes map.
pub const NOTES_KEY: &str = "counselor_client_notes";

/// Client id to note text.
pub type ClientNotes = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum NoteStoreError {
    /// The backing storage cannot be reached (no browser storage, quota, ...)
    #[error("Notes storage unavailable: {0}")]
    Unavailable(String),

    /// The stored payload is not a notes map
    #[error("Invalid notes payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure for file-backed stores
    #[error("Notes file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Get-all / set-all persistence for client notes.
pub trait NoteStore {
    /// Loads the whole map. Absent storage reads as an empty map.
    fn load(&self) -> Result<ClientNotes, NoteStoreError>;

    /// Replaces the whole map.
    fn save(&self, notes: &ClientNotes) -> Result<(), NoteStoreError>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn load(&self) -> Result<ClientNotes, NoteStoreError> {
        (**self).load()
    }

    fn save(&self, notes: &ClientNotes) -> Result<(), NoteStoreError> {
        (**self).save(notes)
    }
}

pub fn encode_notes(notes: &ClientNotes) -> Result<String, NoteStoreError> {
    Ok(serde_json::to_string(notes)?)
}

pub fn decode_notes(payload: &str) -> Result<ClientNotes, NoteStoreError> {
    Ok(serde_json::from_str(payload)?)
}

/// Keeps the serialized payload in memory, the way browser storage would.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    payload: RefCell<Option<String>>,
    writes: RefCell<usize>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing serialized payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RefCell::new(Some(payload.into())),
            writes: RefCell::new(0),
        }
    }

    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl NoteStore for MemoryNoteStore {
    fn load(&self) -> Result<ClientNotes, NoteStoreError> {
        match self.payload.borrow().as_deref() {
            Some(payload) => decode_notes(payload),
            None => Ok(ClientNotes::new()),
        }
    }

    fn save(&self, notes: &ClientNotes) -> Result<(), NoteStoreError> {
        let payload = encode_notes(notes)?;
        *self.payload.borrow_mut() = Some(payload);
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_empty_map() {
        let store = MemoryNoteStore::new();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_whole_map() {
        let store = MemoryNoteStore::new();
        let mut notes = ClientNotes::new();
        notes.insert("u1".to_string(), "prefers evenings".to_string());
        notes.insert("u2".to_string(), "first session".to_string());
        store.save(&notes).unwrap();

        notes.remove("u2");
        store.save(&notes).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["u1"], "prefers evenings");
        assert_eq!(store.writes(), 2);
        assert_eq!(store.payload().unwrap(), r#"{"u1":"prefers evenings"}"#);
    }

    #[test]
    fn test_corrupt_payload_is_reported() {
        let store = MemoryNoteStore::with_payload("not json");
        assert!(matches!(store.load(), Err(NoteStoreError::Serialization(_))));
    }
}
