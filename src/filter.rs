use crate::note::Note;

pub const ALL_PATH: &str = "/";
pub const STARRED_PATH: &str = "/starred";
pub const TRASH_PATH: &str = "/trash";

/// Notes shown for `pathname`. Anything that isn't a known view falls back
/// to the non-trashed notes.
pub fn get_notes(pathname: &str, notes: &[Note]) -> Vec<Note> {
    let keep: fn(&Note) -> bool = match pathname {
        TRASH_PATH => |note: &Note| note.is_trashed,
        STARRED_PATH => |note: &Note| note.is_starred && !note.is_trashed,
        _ => |note: &Note| !note.is_trashed,
    };

    notes.iter().filter(|note| keep(note)).cloned().collect()
}
