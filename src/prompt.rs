use anyhow::{Context, Result};
use std::io::{self, Write};
use std::{thread, time};
use termion::cursor;
use termion::event::Key;

const KEY_POLL_INTERVAL: time::Duration = time::Duration::from_millis(20);

pub fn clear<W: Write>(stdout: &mut W) -> Result<()> {
    write!(
        stdout,
        "{}{}{}",
        termion::clear::All,
        cursor::Goto(1, 1),
        cursor::Show
    )?;

    Ok(())
}

/// Next keystroke, waiting for one if the reader has nothing buffered.
pub fn next_key<I>(keys: &mut I) -> Result<Key>
where
    I: Iterator<Item = io::Result<Key>>,
{
    loop {
        match keys.next() {
            Some(event) => return event.context("Error evaluating keystroke event"),
            None => thread::sleep(KEY_POLL_INTERVAL),
        }
    }
}

pub fn prompt_yesno<W, I>(stdout: &mut W, keys: &mut I, prompt_string: String) -> Result<bool>
where
    W: Write,
    I: Iterator<Item = io::Result<Key>>,
{
    clear(stdout)?;
    write!(stdout, "{}", prompt_string)?;
    stdout.flush()?;

    loop {
        let value = match next_key(keys)? {
            Key::Char('y') | Key::Char('Y') => true,
            Key::Char('n') | Key::Char('N') | Key::Char('\n') | Key::Esc => false,
            _ => continue,
        };

        return Ok(value);
    }
}

// Flash a warning for 1s, e.g. when a key has nothing to act on.
pub fn flash_warning<W: Write>(stdout: &mut W, warning_text: String) -> Result<()> {
    clear(stdout)?;
    write!(stdout, "{}", warning_text)?;
    stdout.flush()?;
    thread::sleep(time::Duration::from_secs(1));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: Vec<Key>) -> impl Iterator<Item = io::Result<Key>> {
        list.into_iter().map(Ok)
    }

    #[test]
    fn yes_after_ignored_keys() {
        let mut out = Vec::new();
        let mut input = keys(vec![Key::Char('x'), Key::Char('Y')]);
        let answer = prompt_yesno(&mut out, &mut input, String::from("Sure? ")).unwrap();

        assert!(answer);
        assert!(String::from_utf8(out).unwrap().contains("Sure? "));
    }

    #[test]
    fn enter_means_no() {
        let mut out = Vec::new();
        let mut input = keys(vec![Key::Char('\n')]);
        assert!(!prompt_yesno(&mut out, &mut input, String::new()).unwrap());
    }
}
