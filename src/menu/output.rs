//! User-facing output
//!
//! Handlers report outcomes through a [`Reporter`]. Reporting is a side
//! effect only: it never changes control flow or return values.

use colored::Colorize;
use std::io::Write;
use tracing::debug;

/// Kind of message emitted by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
    /// Plain line without marker (listings)
    Line,
}

/// Output collaborator of the menus
pub trait Reporter {
    fn report(&mut self, level: Level, message: &str);

    fn info(&mut self, message: &str) {
        self.report(Level::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.report(Level::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.report(Level::Error, message);
    }

    fn line(&mut self, message: &str) {
        self.report(Level::Line, message);
    }
}

/// Writes coloured messages to a terminal
pub struct ConsoleReporter<W> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        ConsoleReporter { out }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, level: Level, message: &str) {
        let result = match level {
            Level::Info => writeln!(self.out, "{} {}", "!".blue(), message),
            Level::Success => writeln!(self.out, "{} {}", "\u{2714}".green(), message),
            Level::Error => writeln!(self.out, "{} {}", "\u{2718}".red(), message),
            Level::Line => writeln!(self.out, "{}", message),
        };
        if let Err(e) = result {
            debug!("Cannot write to terminal: {}", e);
        }
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub messages: Vec<(Level, String)>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|(_, m)| m.contains(needle))
    }

    /// Messages of one level
    pub fn of_level(&self, level: Level) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, level: Level, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}
