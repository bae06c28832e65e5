use crate::note::Note;

use anyhow::Result;

/// Persists note changes. Implementations are shared with the mutation
/// worker threads, hence `Send + Sync`.
pub trait NoteGateway: Send + Sync {
    fn load_notes(&self) -> Result<Vec<Note>>;
    /// Stores `note` and returns the note as persisted.
    fn update_note(&self, note: Note) -> Result<Note>;
    fn delete_note(&self, note: &Note) -> Result<()>;
}
