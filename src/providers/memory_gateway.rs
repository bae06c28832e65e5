use crate::note::Note;
use crate::providers::provider::NoteGateway;

use anyhow::{anyhow, bail, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-process note collection, used by `--scratch` sessions and tests.
#[derive(Default)]
pub struct MemoryGateway {
    notes: Mutex<Vec<Note>>,
    failing: AtomicBool,
}

impl MemoryGateway {
    pub fn new(notes: Vec<Note>) -> Self {
        MemoryGateway {
            notes: Mutex::new(notes),
            failing: AtomicBool::new(false),
        }
    }

    /// While set, every update and delete is rejected.
    #[cfg(test)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("note storage unavailable");
        }
        Ok(())
    }

    fn notes(&self) -> Result<std::sync::MutexGuard<'_, Vec<Note>>> {
        self.notes.lock().map_err(|_| anyhow!("note storage lock poisoned"))
    }
}

impl NoteGateway for MemoryGateway {
    fn load_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes()?.clone())
    }

    fn update_note(&self, note: Note) -> Result<Note> {
        self.check_available()?;
        let mut notes = self.notes()?;
        match notes.iter_mut().find(|n| n.key == note.key) {
            Some(slot) => *slot = note.clone(),
            None => bail!("note {} does not exist", note.key),
        }
        Ok(note)
    }

    fn delete_note(&self, note: &Note) -> Result<()> {
        self.check_available()?;
        let mut notes = self.notes()?;
        let before = notes.len();
        notes.retain(|n| n.key != note.key);
        if notes.len() == before {
            bail!("note {} does not exist", note.key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::tests::note;

    #[test]
    fn failing_switch_rejects_writes() {
        let gateway = MemoryGateway::new(vec![note("a", "Alpha", 1, 1)]);
        gateway.set_failing(true);

        assert!(gateway.update_note(note("a", "Alpha", 1, 1).trashed()).is_err());
        assert!(gateway.delete_note(&note("a", "Alpha", 1, 1)).is_err());

        gateway.set_failing(false);
        let stored = gateway.update_note(note("a", "Alpha", 1, 1).trashed()).unwrap();
        assert!(stored.is_trashed);
        assert!(gateway.load_notes().unwrap()[0].is_trashed);
    }
}
