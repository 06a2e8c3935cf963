use model::{decode_notes, encode_notes, ClientNotes, NoteStore, NoteStoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Client notes kept in a JSON file. A missing file reads as no notes.
pub struct FileNoteStore {
    path: PathBuf,
}

impl FileNoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteStore for FileNoteStore {
    fn load(&self) -> Result<ClientNotes, NoteStoreError> {
        if !self.path.exists() {
            debug!("No notes file at {}", self.path.display());
            return Ok(ClientNotes::new());
        }
        let payload = fs::read_to_string(&self.path)?;
        decode_notes(&payload)
    }

    fn save(&self, notes: &ClientNotes) -> Result<(), NoteStoreError> {
        let payload = encode_notes(notes)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote {} notes to {}", notes.len(), self.path.display());
        Ok(())
    }
}
