mod app;
mod config;
mod controller;
mod filter;
mod location;
mod menu;
mod modal;
mod mutation;
mod note;
mod prompt;
mod providers;
mod render;
mod sort;
mod store;
mod viewport;

use crate::app::App;
use crate::config::{expand_homedir, parse_log_level, Config};
use crate::controller::NoteList;
use crate::location::{History, ViewLocation};
use crate::providers::{FileGateway, MemoryGateway, NoteGateway};
use crate::sort::{SortDir, SortField, SortSpec};
use crate::store::{AppState, Store};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::fs;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use termion::input::TermRead;
use termion::raw::IntoRawMode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to read instead of ~/.noteconfig
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Notes file to use instead of the configured one
    #[arg(short, long)]
    notes_file: Option<PathBuf>,

    /// View to open: "/", "/starred" or "/trash"
    #[arg(short, long, default_value = "/")]
    path: String,

    #[arg(short, long)]
    sort: Option<SortField>,

    #[arg(short, long)]
    order: Option<SortDir>,

    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LevelFilter>,

    /// Print the notes in the view and exit
    #[arg(long)]
    print: bool,

    /// Work on an in-memory copy of the notes; nothing is written back
    #[arg(long)]
    scratch: bool,

    /// Print a default config file and exit
    #[arg(long)]
    generate_config: bool,
}

fn init_logging(config: &Config) -> Result<()> {
    if let Some(dir) = config.get_log_file().parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create log directory {}", dir.display()))?;
    }
    simple_logging::log_to_file(config.get_log_file(), config.get_log_level())
        .with_context(|| format!("could not open log file {}", config.get_log_file().display()))
}

fn build_gateway(config: &Config, scratch: bool) -> Result<Arc<dyn NoteGateway>> {
    let file_gateway = FileGateway::new(config.get_notes_file().to_path_buf());
    info!("using notes file {}", file_gateway.path().display());
    if scratch {
        let notes = file_gateway.load_notes()?;
        info!("scratch session with {} notes", notes.len());
        return Ok(Arc::new(MemoryGateway::new(notes)));
    }

    Ok(Arc::new(file_gateway))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_config {
        print!("{}", toml::to_string(&Config::generate())?);
        return Ok(());
    }

    let config_file = match args.config {
        Some(path) => path,
        None => expand_homedir("~/.noteconfig")?,
    };
    let mut config = Config::load(&config_file)?;
    if let Some(notes_file) = args.notes_file {
        config.set_notes_file(notes_file);
    }
    if let Some(log_level) = args.log_level {
        config.set_log_level(log_level);
    }
    let sort_by = config.get_sort_by();
    config.set_sort_by(SortSpec::new(
        args.sort.unwrap_or(sort_by.field),
        args.order.unwrap_or(sort_by.dir),
    ));

    init_logging(&config)?;
    info!("starting with {:?}", config);

    let gateway = build_gateway(&config, args.scratch)?;
    let notes = gateway
        .load_notes()
        .context("could not load notes")?;
    let store = Store::new(AppState {
        notes,
        history: History::new(ViewLocation::new(&args.path)),
        sort_by: config.get_sort_by(),
        modal: None,
    });

    if args.print {
        let mut list = NoteList::new(gateway);
        for line in render::plain_rows(list.render(store.state())) {
            println!("{}", line);
        }
        return Ok(());
    }

    let (_, h) = termion::terminal_size().context("could not read terminal size")?;
    // one row for the header, one for the footer
    let list_height = usize::from(h.saturating_sub(2));

    let mut stdout = stdout()
        .into_raw_mode()
        .context("Could not open stdout in raw mode")?;
    let mut keys = termion::async_stdin().keys();

    let mut app = App::new(store, gateway, list_height);
    app.run(&mut stdout, &mut keys)
}
