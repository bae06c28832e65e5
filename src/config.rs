use crate::sort::{SortDir, SortField, SortSpec};

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use toml::Table;
use toml::Value;

const DEFAULT_NOTES_FILE: &str = "~/.notes/notes.toml";
const DEFAULT_LOG_FILE: &str = "~/.notes/notelist.log";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SORT_FIELD: &str = "updated_at";
const DEFAULT_SORT_ORDER: &str = "desc";

pub fn expand_homedir(path: &str) -> Result<PathBuf> {
    match path.strip_prefix('~') {
        Some(rest) => {
            let mut home_dir =
                home::home_dir().context("Could not evaluate home directory")?;
            home_dir.push(rest.trim_start_matches('/'));
            Ok(home_dir)
        }
        None => Ok(PathBuf::from(path)),
    }
}

/// Also used as the clap parser for `--log-level`.
pub fn parse_log_level(level: &str) -> std::result::Result<LevelFilter, String> {
    level
        .parse::<LevelFilter>()
        .map_err(|e| format!("invalid log level '{}': {}", level, e))
}

fn get_str<'a>(config: &'a Table, key: &str, default: &'a str) -> Result<&'a str> {
    match config.get(key) {
        Some(value) => value
            .as_str()
            .with_context(|| format!("config value '{}' must be a string", key)),
        None => Ok(default),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    notes_file: PathBuf,
    log_file: PathBuf,
    log_level: LevelFilter,
    sort_by: SortSpec,
}

impl Config {
    pub fn new(config: Table) -> Result<Self> {
        let notes_file = get_str(&config, "notes_file", DEFAULT_NOTES_FILE)?;
        let log_file = get_str(&config, "log_file", DEFAULT_LOG_FILE)?;
        let log_level = get_str(&config, "log_level", DEFAULT_LOG_LEVEL)?;
        let sort_field = get_str(&config, "sort_field", DEFAULT_SORT_FIELD)?;
        let sort_order = get_str(&config, "sort_order", DEFAULT_SORT_ORDER)?;

        Ok(Config {
            notes_file: expand_homedir(notes_file)?,
            log_file: expand_homedir(log_file)?,
            log_level: parse_log_level(log_level).map_err(|e| anyhow!(e))?,
            sort_by: SortSpec::new(
                sort_field.parse::<SortField>()?,
                sort_order.parse::<SortDir>()?,
            ),
        })
    }

    /// Reads `path`; a missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let table = match fs::read_to_string(path) {
            Ok(contents) => contents.parse::<Table>().with_context(|| {
                format!(
                    "Unable to parse {}. Make sure it is valid toml.",
                    path.display()
                )
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Table::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("could not read {}", path.display()))
            }
        };

        Config::new(table)
    }

    pub fn generate() -> Table {
        let mut table = Table::new();
        for (key, value) in [
            ("notes_file", DEFAULT_NOTES_FILE),
            ("log_file", DEFAULT_LOG_FILE),
            ("log_level", DEFAULT_LOG_LEVEL),
            ("sort_field", DEFAULT_SORT_FIELD),
            ("sort_order", DEFAULT_SORT_ORDER),
        ] {
            table.insert(String::from(key), Value::String(String::from(value)));
        }

        table
    }

    pub fn get_notes_file(&self) -> &Path {
        &self.notes_file
    }

    pub fn set_notes_file(&mut self, notes_file: PathBuf) {
        self.notes_file = notes_file;
    }

    pub fn get_log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn get_log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn set_log_level(&mut self, log_level: LevelFilter) {
        self.log_level = log_level;
    }

    pub fn get_sort_by(&self) -> SortSpec {
        self.sort_by
    }

    pub fn set_sort_by(&mut self, sort_by: SortSpec) {
        self.sort_by = sort_by;
    }
}
