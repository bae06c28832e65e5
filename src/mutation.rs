use crate::note::Note;
use crate::providers::NoteGateway;

use anyhow::{anyhow, Result};
use log::debug;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Which list handler issued a mutation. Used to label failures.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Origin {
    Star,
    Trash,
    Restore,
}

impl Origin {
    pub fn handler_name(&self) -> &'static str {
        match self {
            Origin::Star => "handle_star_click",
            Origin::Trash => "handle_trash",
            Origin::Restore => "handle_restore",
        }
    }
}

pub struct Completion {
    pub origin: Origin,
    pub result: Result<Note>,
}

/// Reports a worker's result exactly once, even if the gateway panics.
struct Report {
    origin: Origin,
    sender: Sender<Completion>,
    sent: bool,
}

impl Report {
    fn send(mut self, result: Result<Note>) {
        self.sent = true;
        // The receiver only goes away when the list is torn down.
        let _ = self.sender.send(Completion {
            origin: self.origin,
            result,
        });
    }
}

impl Drop for Report {
    fn drop(&mut self) {
        if !self.sent {
            let _ = self.sender.send(Completion {
                origin: self.origin,
                result: Err(anyhow!("mutation worker stopped before reporting")),
            });
        }
    }
}

/// Runs gateway updates off the UI thread. Results come back in whatever
/// order the workers finish; nothing is cancelled or reordered.
pub struct Mutations {
    gateway: Arc<dyn NoteGateway>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    in_flight: usize,
}

impl Mutations {
    pub fn new(gateway: Arc<dyn NoteGateway>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Mutations {
            gateway,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn submit(&mut self, origin: Origin, note: Note) {
        debug!("submitting {:?} for note {}", origin, note.key);
        let gateway = Arc::clone(&self.gateway);
        let report = Report {
            origin,
            sender: self.sender.clone(),
            sent: false,
        };
        self.in_flight += 1;

        thread::spawn(move || {
            let result = gateway.update_note(note);
            report.send(result);
        });
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Completions that have already arrived. Never blocks.
    pub fn poll(&mut self) -> Vec<Completion> {
        let completed: Vec<Completion> = self.receiver.try_iter().collect();
        self.in_flight -= completed.len();
        completed
    }

    /// Blocks until every submitted mutation has reported back.
    pub fn wait(&mut self) -> Vec<Completion> {
        let mut completed = Vec::with_capacity(self.in_flight);
        while self.in_flight > 0 {
            match self.receiver.recv() {
                Ok(completion) => {
                    self.in_flight -= 1;
                    completed.push(completion);
                }
                Err(_) => break,
            }
        }
        completed
    }
}
