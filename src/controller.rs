use crate::filter::{self, TRASH_PATH};
use crate::location::ViewLocation;
use crate::modal::Modal;
use crate::mutation::{Completion, Mutations, Origin};
use crate::note::Note;
use crate::providers::NoteGateway;
use crate::store::{Action, AppState, Store};

use log::{debug, error};
use std::sync::Arc;

pub const RESTORE_NOTE_LABEL: &str = "Restore Note";
pub const DELETE_NOTE_LABEL: &str = "Delete Note";
pub const MOVE_TO_TRASH_LABEL: &str = "Move to trash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Restore(Note),
    Delete(Note),
    Trash(Note),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

/// Shows a popup of labelled actions and returns the one picked, if any.
pub trait ContextMenu {
    fn popup(&mut self, items: Vec<MenuItem>) -> Option<MenuAction>;
}

/// The note list: derives the visible notes from the store and turns user
/// gestures into navigation changes and note mutations.
pub struct NoteList {
    notes: Vec<Note>,
    mutations: Mutations,
}

impl NoteList {
    pub fn new(gateway: Arc<dyn NoteGateway>) -> Self {
        NoteList {
            notes: Vec::new(),
            mutations: Mutations::new(gateway),
        }
    }

    /// Notes produced by the last `render`.
    pub fn visible_notes(&self) -> &[Note] {
        &self.notes
    }

    /// Filters by pathname and sorts by the active sort spec. Recomputed in
    /// full every time.
    pub fn render(&mut self, state: &AppState) -> &[Note] {
        let mut notes = filter::get_notes(&state.location().pathname, &state.notes);
        notes.sort_by(state.sort_by.comparator());
        self.notes = notes;
        &self.notes
    }

    /// Runs after a render. When nothing visible is selected, selects the
    /// previously selected note if it is still listed, else the first one.
    pub fn reconcile(&self, prev: &ViewLocation, store: &mut Store) {
        let Some(first) = self.notes.first() else {
            return;
        };

        let location = store.state().location();
        if let Some(current) = location.search_key() {
            if self.is_visible(current) {
                return;
            }
            debug!("selected note {} is not in view", current);
        }

        let key = match prev.search_key() {
            Some(prev_key) if self.is_visible(prev_key) => prev_key,
            _ => first.key.as_str(),
        };

        let replacement = ViewLocation::with_key(&location.pathname, key);
        store.dispatch(Action::Replace(replacement));
    }

    fn is_visible(&self, key: &str) -> bool {
        self.notes.iter().any(|note| note.key == key)
    }

    pub fn handle_note_click(&self, key: &str, store: &mut Store) {
        let location = store.state().location();
        if key.is_empty() || location.search_key() == Some(key) {
            return;
        }

        let next = ViewLocation::with_key(&location.pathname, key);
        store.dispatch(Action::Push(next));
    }

    pub fn menu_items(pathname: &str, note: &Note) -> Vec<MenuItem> {
        if pathname == TRASH_PATH {
            vec![
                MenuItem {
                    label: RESTORE_NOTE_LABEL,
                    action: MenuAction::Restore(note.clone()),
                },
                MenuItem {
                    label: DELETE_NOTE_LABEL,
                    action: MenuAction::Delete(note.clone()),
                },
            ]
        } else {
            vec![MenuItem {
                label: MOVE_TO_TRASH_LABEL,
                action: MenuAction::Trash(note.clone()),
            }]
        }
    }

    pub fn handle_note_context_menu(
        &mut self,
        note: &Note,
        store: &mut Store,
        menu: &mut dyn ContextMenu,
    ) {
        self.handle_note_click(&note.key, store);

        let items = Self::menu_items(&store.state().location().pathname, note);
        if let Some(action) = menu.popup(items) {
            self.invoke(action, store);
        }
    }

    pub fn invoke(&mut self, action: MenuAction, store: &mut Store) {
        match action {
            MenuAction::Restore(note) => self.handle_restore(&note),
            MenuAction::Delete(note) => self.handle_delete_note(&note, store),
            MenuAction::Trash(note) => self.handle_trash(&note),
        }
    }

    pub fn handle_star_click(&mut self, note: &Note) {
        self.mutations.submit(Origin::Star, note.with_star_toggled());
    }

    pub fn handle_trash(&mut self, note: &Note) {
        self.mutations.submit(Origin::Trash, note.trashed());
    }

    pub fn handle_restore(&mut self, note: &Note) {
        self.mutations.submit(Origin::Restore, note.restored());
    }

    /// Only asks for confirmation; the modal does the deleting.
    pub fn handle_delete_note(&self, note: &Note, store: &mut Store) {
        store.dispatch(Action::ShowModal(Modal::DeleteNoteConfirmation(
            note.clone(),
        )));
    }

    pub fn pending_mutations(&self) -> usize {
        self.mutations.in_flight()
    }

    /// Applies whatever mutations have finished so far. Returns how many.
    pub fn apply_completions(&mut self, store: &mut Store) -> usize {
        let completed = self.mutations.poll();
        let count = completed.len();
        completed.into_iter().for_each(|c| apply(c, store));
        count
    }

    /// Waits for every outstanding mutation and applies the results.
    pub fn settle(&mut self, store: &mut Store) {
        for completion in self.mutations.wait() {
            apply(completion, store);
        }
    }
}

fn apply(completion: Completion, store: &mut Store) {
    match completion.result {
        Ok(note) => store.dispatch(Action::UpdateNote(note)),
        Err(e) => error!(
            "Error in {}() in NoteList: {:#}",
            completion.origin.handler_name(),
            e
        ),
    }
}
