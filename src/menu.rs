use crate::controller::{ContextMenu, MenuAction, MenuItem};
use crate::prompt::next_key;

use anyhow::Result;
use log::error;
use std::io::{self, Write};
use termion::event::Key;
use termion::{color, cursor};

/// Context menu drawn as a list at the top-left of the terminal. `j`/`k`
/// move, Enter picks, Esc or `q` dismisses.
pub struct TerminalMenu<'a, W: Write, I: Iterator<Item = io::Result<Key>>> {
    stdout: &'a mut W,
    keys: &'a mut I,
}

impl<'a, W, I> TerminalMenu<'a, W, I>
where
    W: Write,
    I: Iterator<Item = io::Result<Key>>,
{
    pub fn new(stdout: &'a mut W, keys: &'a mut I) -> Self {
        TerminalMenu { stdout, keys }
    }

    fn draw(&mut self, items: &[MenuItem], selected: usize) -> Result<()> {
        let width = items.iter().map(|i| i.label.len()).max().unwrap_or(0) + 4;
        write!(
            self.stdout,
            "{clear}{goto}{color}Actions:{reset}",
            clear = termion::clear::All,
            goto = cursor::Goto(1, 1),
            color = color::Fg(color::Yellow),
            reset = color::Fg(color::Reset)
        )?;

        for (index, item) in items.iter().enumerate() {
            let goto = cursor::Goto(1, (index + 2) as u16);
            if index == selected {
                write!(
                    self.stdout,
                    "{goto}{highlight}{fontcolor}  {label:<width$}{reset_highlight}{reset_fontcolor}",
                    highlight = color::Bg(color::White),
                    fontcolor = color::Fg(color::Black),
                    label = item.label,
                    reset_highlight = color::Bg(color::Reset),
                    reset_fontcolor = color::Fg(color::Reset)
                )?;
            } else {
                write!(self.stdout, "{goto}  {label:<width$}", label = item.label)?;
            }
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn choose(&mut self, items: &[MenuItem]) -> Result<Option<usize>> {
        let mut selected = 0;
        loop {
            self.draw(items, selected)?;
            match next_key(&mut *self.keys)? {
                Key::Char('j') | Key::Down => {
                    if selected + 1 < items.len() {
                        selected += 1;
                    }
                }
                Key::Char('k') | Key::Up => selected = selected.saturating_sub(1),
                Key::Char('\n') => return Ok(Some(selected)),
                Key::Esc | Key::Char('q') => return Ok(None),
                _ => {}
            }
        }
    }
}

impl<W, I> ContextMenu for TerminalMenu<'_, W, I>
where
    W: Write,
    I: Iterator<Item = io::Result<Key>>,
{
    fn popup(&mut self, items: Vec<MenuItem>) -> Option<MenuAction> {
        if items.is_empty() {
            return None;
        }

        match self.choose(&items) {
            Ok(choice) => choice.and_then(|index| items.into_iter().nth(index)).map(|i| i.action),
            Err(e) => {
                error!("context menu failed: {:#}", e);
                None
            }
        }
    }
}
