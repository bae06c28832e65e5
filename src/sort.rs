use crate::note::Note;

use anyhow::{bail, Result};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SortField {
    UpdatedAt,
    CreatedAt,
    Alphabetical,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SortDir {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SortSpec {
    pub field: SortField,
    pub dir: SortDir,
}

pub type Comparator = fn(&Note, &Note) -> Ordering;

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            field: SortField::UpdatedAt,
            dir: SortDir::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, dir: SortDir) -> Self {
        SortSpec { field, dir }
    }

    /// Picking the active field again flips the direction, a new field starts descending.
    pub fn toggle(&self, field: SortField) -> SortSpec {
        let dir = if self.field == field && self.dir == SortDir::Desc {
            SortDir::Asc
        } else {
            SortDir::Desc
        };

        SortSpec { field, dir }
    }

    pub fn comparator(&self) -> Comparator {
        match (self.field, self.dir) {
            (SortField::UpdatedAt, SortDir::Desc) => by_updated_at_desc,
            (SortField::UpdatedAt, SortDir::Asc) => by_updated_at_asc,
            (SortField::CreatedAt, SortDir::Desc) => by_created_at_desc,
            (SortField::CreatedAt, SortDir::Asc) => by_created_at_asc,
            (SortField::Alphabetical, SortDir::Desc) => by_title_desc,
            (SortField::Alphabetical, SortDir::Asc) => by_title_asc,
        }
    }
}

fn by_updated_at_desc(a: &Note, b: &Note) -> Ordering {
    b.updated_at.cmp(&a.updated_at)
}

fn by_updated_at_asc(a: &Note, b: &Note) -> Ordering {
    a.updated_at.cmp(&b.updated_at)
}

fn by_created_at_desc(a: &Note, b: &Note) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

fn by_created_at_asc(a: &Note, b: &Note) -> Ordering {
    a.created_at.cmp(&b.created_at)
}

fn by_title_desc(a: &Note, b: &Note) -> Ordering {
    collate(&b.title, &a.title)
}

fn by_title_asc(a: &Note, b: &Note) -> Ordering {
    collate(&a.title, &b.title)
}

// Case-insensitive first so "apple" sits next to "Apple", then by code point.
fn collate(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}

impl FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "updated_at" | "updated" => Ok(SortField::UpdatedAt),
            "created_at" | "created" => Ok(SortField::CreatedAt),
            "alphabetical" | "title" => Ok(SortField::Alphabetical),
            other => bail!("unknown sort field '{}'", other),
        }
    }
}

impl FromStr for SortDir {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            other => bail!("unknown sort order '{}'", other),
        }
    }
}
