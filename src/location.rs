use crate::filter::ALL_PATH;

const KEY_PREFIX: &str = "key=";

/// Which subset of notes is on screen (`pathname`) and which note is
/// selected (`search`, shaped `key=<noteKey>` or empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLocation {
    pub pathname: String,
    pub search: String,
}

impl Default for ViewLocation {
    fn default() -> Self {
        ViewLocation::new(ALL_PATH)
    }
}

impl ViewLocation {
    pub fn new(pathname: &str) -> Self {
        ViewLocation {
            pathname: pathname.to_string(),
            search: String::new(),
        }
    }

    pub fn with_key(pathname: &str, key: &str) -> Self {
        ViewLocation {
            pathname: pathname.to_string(),
            search: format!("{KEY_PREFIX}{key}"),
        }
    }

    pub fn search_key(&self) -> Option<&str> {
        let search = self.search.strip_prefix('?').unwrap_or(&self.search);
        search
            .strip_prefix(KEY_PREFIX)
            .filter(|key| !key.is_empty())
    }
}

/// Navigation entries, newest last. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<ViewLocation>,
}

impl Default for History {
    fn default() -> Self {
        History::new(ViewLocation::default())
    }
}

impl History {
    pub fn new(initial: ViewLocation) -> Self {
        History {
            entries: vec![initial],
        }
    }

    pub fn location(&self) -> &ViewLocation {
        // entries always holds at least the initial location
        &self.entries[self.entries.len() - 1]
    }

    pub fn push(&mut self, location: ViewLocation) {
        self.entries.push(location);
    }

    pub fn replace(&mut self, location: ViewLocation) {
        if let Some(current) = self.entries.last_mut() {
            *current = location;
        }
    }

    /// Returns false when already at the first entry.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }
}
