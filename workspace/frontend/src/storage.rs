use model::{decode_notes, encode_notes, ClientNotes, NoteStore, NoteStoreError, NOTES_KEY};
use web_sys::{window, Storage};

/// Client notes in the browser's localStorage, under a single key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalStorageNotes;

impl LocalStorageNotes {
    fn storage() -> Result<Storage, NoteStoreError> {
        window()
            .ok_or_else(|| NoteStoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| NoteStoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| NoteStoreError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl NoteStore for LocalStorageNotes {
    fn load(&self) -> Result<ClientNotes, NoteStoreError> {
        let payload = Self::storage()?
            .get_item(NOTES_KEY)
            .map_err(|e| NoteStoreError::Unavailable(format!("{:?}", e)))?;
        match payload {
            Some(payload) => decode_notes(&payload),
            None => Ok(ClientNotes::new()),
        }
    }

    fn save(&self, notes: &ClientNotes) -> Result<(), NoteStoreError> {
        let payload = encode_notes(notes)?;
        Self::storage()?
            .set_item(NOTES_KEY, &payload)
            .map_err(|e| NoteStoreError::Unavailable(format!("{:?}", e)))?;
        log::debug!("Saved notes for {} clients", notes.len());
        Ok(())
    }
}
