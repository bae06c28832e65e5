use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single note. Values are never mutated in place by the list; every
/// change produces a new `Note` that is submitted to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub is_trashed: bool,
}

impl Note {
    pub fn with_star_toggled(&self) -> Note {
        Note {
            is_starred: !self.is_starred,
            ..self.clone()
        }
    }

    /// Trashed notes lose their star.
    pub fn trashed(&self) -> Note {
        Note {
            is_starred: false,
            is_trashed: true,
            ..self.clone()
        }
    }

    pub fn restored(&self) -> Note {
        Note {
            is_trashed: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    pub(crate) fn note(key: &str, title: &str, created: i64, updated: i64) -> Note {
        Note {
            key: key.to_string(),
            title: title.to_string(),
            body: String::new(),
            created_at: at(created),
            updated_at: at(updated),
            is_starred: false,
            is_trashed: false,
        }
    }

    #[test]
    fn star_toggle_changes_only_the_star() {
        let original = note("a", "Alpha", 1, 2);
        let starred = original.with_star_toggled();

        assert!(starred.is_starred);
        assert_eq!(
            Note {
                is_starred: false,
                ..starred.clone()
            },
            original
        );
        assert!(!starred.with_star_toggled().is_starred);
    }

    #[test]
    fn trash_clears_star() {
        let original = note("a", "Alpha", 1, 2).with_star_toggled();
        let trashed = original.trashed();

        assert!(trashed.is_trashed);
        assert!(!trashed.is_starred);
        assert!(original.is_starred, "receiver must be left untouched");
    }

    #[test]
    fn restore_keeps_star() {
        let mut original = note("a", "Alpha", 1, 2);
        original.is_starred = true;
        original.is_trashed = true;
        let restored = original.restored();

        assert!(!restored.is_trashed);
        assert!(restored.is_starred);
    }
}
