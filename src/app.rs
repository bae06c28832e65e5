use crate::controller::NoteList;
use crate::filter::{ALL_PATH, STARRED_PATH, TRASH_PATH};
use crate::location::ViewLocation;
use crate::menu::TerminalMenu;
use crate::modal;
use crate::note::Note;
use crate::prompt::{clear, flash_warning, prompt_yesno};
use crate::providers::NoteGateway;
use crate::render::{note_columns, TableDisplay};
use crate::sort::SortField;
use crate::store::{Action, Store};
use crate::viewport::Viewport;

use anyhow::Result;
use log::{debug, info};
use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::Arc;
use std::{thread, time};
use termion::cursor;
use termion::event::Key;

const TICK: time::Duration = time::Duration::from_millis(50);
const HELP: &str =
    "j/k move  s star  t trash  r restore  D delete  m menu  1/2/3 sort  a/*/T view  b back  q quit";

enum Flow {
    Continue,
    Quit,
}

pub struct App {
    store: Store,
    list: NoteList,
    gateway: Arc<dyn NoteGateway>,
    viewport: Viewport,
    dirty: Rc<Cell<bool>>,
}

impl App {
    pub fn new(mut store: Store, gateway: Arc<dyn NoteGateway>, list_height: usize) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        store.subscribe(Box::new(move |_| flag.set(true)));

        App {
            store,
            list: NoteList::new(Arc::clone(&gateway)),
            gateway,
            viewport: Viewport::new(list_height),
            dirty,
        }
    }

    /// Main loop. Keys are read from a non-blocking source so finished
    /// mutations show up without waiting for the next keystroke.
    pub fn run<W, I>(&mut self, stdout: &mut W, keys: &mut I) -> Result<()>
    where
        W: Write,
        I: Iterator<Item = io::Result<Key>>,
    {
        let mut prev_location = self.store.state().location().clone();

        loop {
            self.list.apply_completions(&mut self.store);

            if let Some(open) = self.store.state().modal.clone() {
                let confirmed = prompt_yesno(stdout, keys, open.prompt())?;
                modal::resolve(&mut self.store, self.gateway.as_ref(), confirmed);
                continue;
            }

            if self.dirty.replace(false) {
                self.list.render(self.store.state());
                self.list.reconcile(&prev_location, &mut self.store);
                prev_location = self.store.state().location().clone();
                self.draw(stdout)?;
            }

            match keys.next() {
                Some(key) => {
                    if let Flow::Quit = self.handle_key(key?, stdout, keys)? {
                        break;
                    }
                }
                None => thread::sleep(TICK),
            }
        }

        if self.list.pending_mutations() > 0 {
            info!(
                "waiting on {} outstanding note updates",
                self.list.pending_mutations()
            );
            self.list.settle(&mut self.store);
        }
        clear(stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn selected(&self) -> Option<(usize, &Note)> {
        let key = self.store.state().location().search_key()?;
        self.list
            .visible_notes()
            .iter()
            .enumerate()
            .find(|(_, note)| note.key == key)
    }

    fn select_offset(&mut self, forward: bool) {
        let notes = self.list.visible_notes();
        let next = match self.selected() {
            Some((index, _)) if forward => (index + 1).min(notes.len().saturating_sub(1)),
            Some((index, _)) => index.saturating_sub(1),
            None => 0,
        };

        if let Some(note) = notes.get(next) {
            let key = note.key.clone();
            self.list.handle_note_click(&key, &mut self.store);
        }
    }

    fn navigate(&mut self, pathname: &str) {
        if self.store.state().location().pathname != pathname {
            debug!("switching view to {}", pathname);
            self.store.dispatch(Action::Push(ViewLocation::new(pathname)));
        }
    }

    fn sort_by(&mut self, field: SortField) {
        let sort_by = self.store.state().sort_by.toggle(field);
        self.store.dispatch(Action::SetSortBy(sort_by));
    }

    fn handle_key<W, I>(&mut self, key: Key, stdout: &mut W, keys: &mut I) -> Result<Flow>
    where
        W: Write,
        I: Iterator<Item = io::Result<Key>>,
    {
        match key {
            Key::Char('q') => return Ok(Flow::Quit),
            Key::Char('j') | Key::Down => self.select_offset(true),
            Key::Char('k') | Key::Up => self.select_offset(false),
            Key::Char('1') => self.sort_by(SortField::UpdatedAt),
            Key::Char('2') => self.sort_by(SortField::CreatedAt),
            Key::Char('3') => self.sort_by(SortField::Alphabetical),
            Key::Char('a') => self.navigate(ALL_PATH),
            Key::Char('*') => self.navigate(STARRED_PATH),
            Key::Char('T') => self.navigate(TRASH_PATH),
            Key::Char('b') => self.store.dispatch(Action::Back),
            Key::Char(c @ ('s' | 't' | 'r' | 'D' | 'm')) => {
                let Some((_, note)) = self.selected() else {
                    flash_warning(stdout, String::from("No note selected."))?;
                    self.dirty.set(true);
                    return Ok(Flow::Continue);
                };
                let note = note.clone();

                match c {
                    's' => self.list.handle_star_click(&note),
                    't' => self.list.handle_trash(&note),
                    'r' => self.list.handle_restore(&note),
                    'D' => self.list.handle_delete_note(&note, &mut self.store),
                    _ => {
                        let mut menu = TerminalMenu::new(stdout, keys);
                        self.list
                            .handle_note_context_menu(&note, &mut self.store, &mut menu);
                        self.dirty.set(true);
                    }
                }
            }
            _ => {}
        }

        Ok(Flow::Continue)
    }

    fn draw<W: Write>(&mut self, stdout: &mut W) -> Result<()> {
        if let Ok((_, h)) = termion::terminal_size() {
            self.viewport.resize(usize::from(h.saturating_sub(2)));
        }
        let selected = self.selected().map(|(index, _)| index);
        let notes = self.list.visible_notes();
        if let Some(index) = selected {
            self.viewport.follow(index, notes.len());
        }

        let location = self.store.state().location();
        let table = TableDisplay {
            rows: notes,
            columns: note_columns(),
            sort_by: self.store.state().sort_by,
            selected_key: location.search_key(),
            viewport: &self.viewport,
        };
        write!(stdout, "{}{}", cursor::Hide, table.draw())?;

        let footer_row = (self.viewport.height() + 2) as u16;
        write!(
            stdout,
            "{goto}[{path}] {count} notes  {HELP}",
            goto = cursor::Goto(1, footer_row),
            path = location.pathname,
            count = notes.len(),
        )?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::tests::note;
    use crate::providers::MemoryGateway;
    use crate::store::AppState;

    fn app(notes: Vec<Note>) -> (App, Arc<MemoryGateway>) {
        let gateway = Arc::new(MemoryGateway::new(notes.clone()));
        let store = Store::new(AppState {
            notes,
            ..AppState::default()
        });
        (App::new(store, gateway.clone(), 10), gateway)
    }

    fn drive(app: &mut App, script: Vec<Key>) -> String {
        let mut out = Vec::new();
        let mut keys = script.into_iter().map(Ok);
        app.run(&mut out, &mut keys).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn selected_key(app: &App) -> Option<String> {
        app.store
            .state()
            .location()
            .search_key()
            .map(str::to_string)
    }

    #[test]
    fn first_note_is_selected_and_drawn() {
        let (mut app, _) = app(vec![note("a", "Alpha", 1, 1), note("b", "Beta", 2, 2)]);

        let drawn = drive(&mut app, vec![Key::Char('q')]);

        assert_eq!(selected_key(&app).as_deref(), Some("b"));
        assert!(drawn.contains("Alpha"));
        assert!(drawn.contains("Beta"));
    }

    #[test]
    fn trash_then_view_trash() {
        let (mut app, gateway) = app(vec![note("a", "Alpha", 1, 1), note("b", "Beta", 2, 2)]);

        drive(&mut app, vec![Key::Char('t'), Key::Char('q')]);
        assert!(gateway.load_notes().unwrap()[1].is_trashed);
        assert!(app.store.state().notes[1].is_trashed);

        drive(&mut app, vec![Key::Char('T'), Key::Char('q')]);
        assert_eq!(app.store.state().location().pathname, TRASH_PATH);
        assert_eq!(selected_key(&app).as_deref(), Some("b"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut app, gateway) = app(vec![note("a", "Alpha", 1, 1)]);

        drive(
            &mut app,
            vec![Key::Char('D'), Key::Char('n'), Key::Char('D'), Key::Char('y'), Key::Char('q')],
        );

        assert!(gateway.load_notes().unwrap().is_empty());
        assert!(app.store.state().notes.is_empty());
        assert!(app.store.state().modal.is_none());
    }

    #[test]
    fn movement_and_sorting() {
        let (mut app, _) = app(vec![
            note("a", "Alpha", 1, 1),
            note("b", "Beta", 2, 2),
            note("c", "Gamma", 3, 3),
        ]);

        drive(&mut app, vec![Key::Char('j'), Key::Char('j'), Key::Char('j'), Key::Char('q')]);
        assert_eq!(selected_key(&app).as_deref(), Some("a"));

        drive(&mut app, vec![Key::Char('1'), Key::Char('k'), Key::Char('q')]);
        assert_eq!(selected_key(&app).as_deref(), Some("a"));

        // titles descending: Gamma, Beta, Alpha
        drive(&mut app, vec![Key::Char('3'), Key::Char('k'), Key::Char('q')]);
        assert_eq!(selected_key(&app).as_deref(), Some("b"));
    }
}
