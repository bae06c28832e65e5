use crate::location::{History, ViewLocation};
use crate::modal::Modal;
use crate::note::Note;
use crate::sort::SortSpec;

use log::debug;

/// Everything the note list reads. One snapshot per render cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub notes: Vec<Note>,
    pub history: History,
    pub sort_by: SortSpec,
    pub modal: Option<Modal>,
}

impl AppState {
    pub fn location(&self) -> &ViewLocation {
        self.history.location()
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    SetNotes(Vec<Note>),
    UpdateNote(Note),
    RemoveNote(String),
    Push(ViewLocation),
    Replace(ViewLocation),
    Back,
    SetSortBy(SortSpec),
    ShowModal(Modal),
    HideModal,
}

pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetNotes(notes) => state.notes = notes,
        Action::UpdateNote(note) => {
            if let Some(slot) = state.notes.iter_mut().find(|n| n.key == note.key) {
                *slot = note;
            }
        }
        Action::RemoveNote(key) => state.notes.retain(|n| n.key != key),
        Action::Push(location) => state.history.push(location),
        Action::Replace(location) => state.history.replace(location),
        Action::Back => {
            state.history.back();
        }
        Action::SetSortBy(sort_by) => state.sort_by = sort_by,
        Action::ShowModal(modal) => state.modal = Some(modal),
        Action::HideModal => state.modal = None,
    }

    state
}

pub type Listener = Box<dyn FnMut(&AppState)>;

/// Owns the application state. Changes only go through `dispatch`, which
/// runs the reducer and then tells every subscriber.
pub struct Store {
    state: AppState,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Store {
            state,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {:?}", action);
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::tests::note;
    use std::cell::Cell;
    use std::rc::Rc;

    fn store_with_notes() -> Store {
        Store::new(AppState {
            notes: vec![note("a", "Alpha", 1, 1), note("b", "Beta", 2, 2)],
            ..AppState::default()
        })
    }

    #[test]
    fn update_replaces_note_by_key() {
        let mut store = store_with_notes();
        let starred = store.state().notes[1].with_star_toggled();

        store.dispatch(Action::UpdateNote(starred.clone()));

        assert_eq!(store.state().notes[1], starred);
        assert!(!store.state().notes[0].is_starred);
    }

    #[test]
    fn update_of_unknown_key_changes_nothing() {
        let mut store = store_with_notes();
        let before = store.state().clone();

        store.dispatch(Action::UpdateNote(note("zzz", "Ghost", 0, 0)));

        assert_eq!(store.state(), &before);
    }

    #[test]
    fn remove_and_navigation() {
        let mut store = store_with_notes();
        store.dispatch(Action::RemoveNote("a".to_string()));
        store.dispatch(Action::Push(ViewLocation::with_key("/trash", "b")));

        assert_eq!(store.state().notes.len(), 1);
        assert_eq!(store.state().location().pathname, "/trash");

        store.dispatch(Action::Back);
        assert_eq!(store.state().location(), &ViewLocation::default());
    }

    #[test]
    fn subscribers_see_each_dispatch() {
        let mut store = store_with_notes();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        store.subscribe(Box::new(move |_| seen.set(seen.get() + 1)));

        store.dispatch(Action::HideModal);
        store.dispatch(Action::Back);

        assert_eq!(calls.get(), 2);
    }
}
