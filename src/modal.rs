use crate::note::Note;
use crate::providers::NoteGateway;
use crate::store::{Action, Store};

use log::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    DeleteNoteConfirmation(Note),
}

impl Modal {
    pub fn prompt(&self) -> String {
        match self {
            Modal::DeleteNoteConfirmation(note) => format!(
                "Delete '{}' permanently? This cannot be undone. [y/N] ",
                note.title
            ),
        }
    }
}

/// Settles whichever modal is open with the user's answer, then hides it.
pub fn resolve(store: &mut Store, gateway: &dyn NoteGateway, confirmed: bool) {
    let Some(modal) = store.state().modal.clone() else {
        return;
    };

    match modal {
        Modal::DeleteNoteConfirmation(note) if confirmed => match gateway.delete_note(&note) {
            Ok(()) => {
                info!("deleted note {}", note.key);
                store.dispatch(Action::RemoveNote(note.key));
            }
            Err(e) => error!("Error deleting note {} in DeleteNoteConfirmation: {:#}", note.key, e),
        },
        Modal::DeleteNoteConfirmation(_) => {}
    }

    store.dispatch(Action::HideModal);
}
