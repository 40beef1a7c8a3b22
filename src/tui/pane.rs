//! Dashboard log pane
//!
//! A fixed-size, thread-safe ring buffer of parsed log entries. The pane is a
//! plain `io::Write` sink so it can sit next to the hub behind the same
//! fan-out writer; each line written is split into a level and a message with
//! [`parse_line`]. Writes are assembled into whole lines first, so a line that
//! arrives in pieces becomes a single entry.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::shared::{parse_line, LineBuffer, LogLevel};

/// One visible row of the pane
#[derive(Debug, Clone, PartialEq)]
pub struct PaneEntry {
    pub time: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Bounded on-screen log buffer.
///
/// Clones share the same entries. Each handle keeps its own partial line.
#[derive(Debug)]
pub struct LogPane {
    entries: Arc<Mutex<VecDeque<PaneEntry>>>,
    max_lines: usize,
    partial: LineBuffer,
}

impl Clone for LogPane {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            max_lines: self.max_lines,
            partial: LineBuffer::new(),
        }
    }
}

impl LogPane {
    /// Keep at most `max_lines` entries (at least one)
    pub fn new(max_lines: usize) -> Self {
        let max_lines = max_lines.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(max_lines))),
            max_lines,
            partial: LineBuffer::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PaneEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry, evicting the oldest one once the pane is full
    pub fn push(&self, level: LogLevel, message: impl Into<String>) {
        let entry = PaneEntry {
            time: Local::now(),
            level,
            message: message.into(),
        };
        let mut entries = self.lock();
        if entries.len() >= self.max_lines {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Copy of the visible entries, oldest first
    pub fn snapshot(&self) -> Vec<PaneEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    fn push_line(&self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let (level, message) = parse_line(line);
        if !message.is_empty() {
            self.push(level, message);
        }
    }

    fn finish_partial(&mut self) {
        let mut partial = std::mem::take(&mut self.partial);
        partial.finish(|line| self.push_line(line));
        self.partial = partial;
    }
}

impl Write for LogPane {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut partial = std::mem::take(&mut self.partial);
        partial.feed(buf, |line| self.push_line(line));
        self.partial = partial;
        Ok(buf.len())
    }

    /// Emits an unterminated tail as its own entry
    fn flush(&mut self) -> io::Result<()> {
        self.finish_partial();
        Ok(())
    }
}

impl Drop for LogPane {
    fn drop(&mut self) {
        self.finish_partial();
    }
}
