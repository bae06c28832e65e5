use crate::note::Note;
use crate::providers::provider::NoteGateway;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotesDocument {
    #[serde(default)]
    notes: Vec<Note>,
}

/// Keeps every note in a single TOML document. Each write rewrites the file.
pub struct FileGateway {
    path: PathBuf,
    // serializes read-modify-write cycles from concurrent mutation workers
    lock: Mutex<()>,
}

impl FileGateway {
    pub fn new(path: PathBuf) -> Self {
        FileGateway {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<NotesDocument> {
        if !self.path.exists() {
            debug!("{} does not exist yet, starting empty", self.path.display());
            return Ok(NotesDocument::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("could not read {}", self.path.display()))?;
        toml::from_str::<NotesDocument>(&contents)
            .with_context(|| format!("{} is not a valid notes file", self.path.display()))
    }

    fn write(&self, document: &NotesDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }

        let contents = toml::to_string(document).context("could not serialize notes")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("could not write {}", self.path.display()))
    }
}

impl NoteGateway for FileGateway {
    fn load_notes(&self) -> Result<Vec<Note>> {
        let document = self.read()?;
        info!(
            "loaded {} notes from {}",
            document.notes.len(),
            self.path.display()
        );
        Ok(document.notes)
    }

    fn update_note(&self, note: Note) -> Result<Note> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("notes file lock poisoned"))?;
        let mut document = self.read()?;

        match document.notes.iter_mut().find(|n| n.key == note.key) {
            Some(slot) => *slot = note.clone(),
            None => bail!("note {} does not exist", note.key),
        }

        self.write(&document)?;
        debug!("updated note {}", note.key);
        Ok(note)
    }

    fn delete_note(&self, note: &Note) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("notes file lock poisoned"))?;
        let mut document = self.read()?;

        let before = document.notes.len();
        document.notes.retain(|n| n.key != note.key);
        if document.notes.len() == before {
            bail!("note {} does not exist", note.key);
        }

        self.write(&document)?;
        debug!("deleted note {}", note.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{Mutations, Origin};
    use crate::note::tests::note;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn seeded(dir: &TempDir) -> FileGateway {
        let gateway = FileGateway::new(dir.path().join("notes").join("notes.toml"));
        let document = NotesDocument {
            notes: vec![note("a", "Alpha", 1, 1), note("b", "Beta", 2, 2)],
        };
        gateway.write(&document).unwrap();
        gateway
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FileGateway::new(dir.path().join("notes.toml"));
        assert!(gateway.load_notes().unwrap().is_empty());
    }

    #[test]
    fn update_persists_note() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = seeded(&dir);
        let trashed = note("a", "Alpha", 1, 1).trashed();

        let stored = gateway.update_note(trashed.clone()).unwrap();
        let reloaded = gateway.load_notes().unwrap();

        assert_eq!(stored, trashed);
        assert_eq!(reloaded[0], trashed);
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn update_of_unknown_note_fails() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = seeded(&dir);
        assert!(gateway.update_note(note("zzz", "Ghost", 0, 0)).is_err());
    }

    #[test]
    fn delete_removes_note() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = seeded(&dir);
        gateway.delete_note(&note("b", "Beta", 2, 2)).unwrap();
        let keys: Vec<String> = gateway
            .load_notes()
            .unwrap()
            .into_iter()
            .map(|n| n.key)
            .collect();

        assert_eq!(keys, ["a"]);
    }

    #[test]
    fn concurrent_updates_to_different_notes_all_persist() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(seeded(&dir));
        let mut mutations = Mutations::new(gateway.clone());

        for _ in 0..8 {
            mutations.submit(Origin::Star, note("a", "Alpha", 1, 1).with_star_toggled());
            mutations.submit(Origin::Trash, note("b", "Beta", 2, 2).trashed());
        }
        let completed = mutations.wait();

        assert_eq!(completed.len(), 16);
        assert!(completed.iter().all(|c| c.result.is_ok()));
        let reloaded = gateway.load_notes().unwrap();
        assert!(reloaded[0].is_starred);
        assert!(reloaded[1].is_trashed);
    }
}
