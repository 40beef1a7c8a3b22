/**
 * Write Sinks
 *
 * Adapters that let any byte-stream producer target the hub through
 * `std::io::Write`, plus the fan-out writer used by the tracing subscriber to
 * duplicate formatted output into several destinations at once.
 *
 * # Recursion
 *
 * These writers sit underneath the tracing subscriber. They must never emit
 * tracing events themselves; destination failures are reported on stderr.
 */
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

use crate::backend::hub::LogHub;
use crate::shared::LineBuffer;

/// `io::Write` sink that publishes every line written to it.
///
/// Bytes are collected until a `\n` completes the line, so a line written in
/// several pieces is published once. Trailing carriage returns are trimmed
/// and empty lines are skipped. `flush` (and drop) publishes an unterminated
/// tail.
#[derive(Debug)]
pub struct HubWriter {
    hub: LogHub,
    buffer: LineBuffer,
}

impl HubWriter {
    pub fn new(hub: LogHub) -> Self {
        Self {
            hub,
            buffer: LineBuffer::new(),
        }
    }
}

fn publish_line(hub: &LogHub, line: &str) {
    if !line.is_empty() {
        hub.publish(line);
    }
}

impl Write for HubWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let hub = &self.hub;
        self.buffer.feed(buf, |line| publish_line(hub, line));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let hub = &self.hub;
        self.buffer.finish(|line| publish_line(hub, line));
        Ok(())
    }
}

impl Drop for HubWriter {
    fn drop(&mut self) {
        let hub = &self.hub;
        self.buffer.finish(|line| publish_line(hub, line));
    }
}

type Destination = Arc<Mutex<Box<dyn Write + Send>>>;

/// Ordered multi-destination writer.
///
/// Every write is forwarded to every destination in registration order. A
/// destination that fails is reported on stderr and skipped for that write;
/// the remaining destinations still receive the data and the caller always
/// sees the full length written.
///
/// ```rust
/// use livetail::backend::hub::LogHub;
/// use livetail::backend::producers::{FanoutWriter, HubWriter};
/// use std::io::Write;
///
/// let hub = LogHub::default();
/// let mut subscription = hub.subscribe();
/// let mut writer = FanoutWriter::new().with(HubWriter::new(hub.clone()));
/// writer.write_all(b"hello\n").unwrap();
/// assert_eq!(subscription.try_recv().unwrap().as_str(), "hello");
/// ```
#[derive(Clone, Default)]
pub struct FanoutWriter {
    destinations: Arc<Vec<Destination>>,
}

impl FanoutWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a destination and return the writer
    pub fn with(mut self, destination: impl Write + Send + 'static) -> Self {
        self.push(destination);
        self
    }

    /// Append a destination
    pub fn push(&mut self, destination: impl Write + Send + 'static) {
        let destination: Box<dyn Write + Send> = Box::new(destination);
        Arc::make_mut(&mut self.destinations).push(Arc::new(Mutex::new(destination)));
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    fn for_each<F>(&self, action: &str, mut op: F)
    where
        F: FnMut(&mut dyn Write) -> io::Result<()>,
    {
        for (index, destination) in self.destinations.iter().enumerate() {
            let mut destination = destination.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = op(destination.as_mut()) {
                eprintln!("[Fanout] destination {} failed to {}: {}", index, action, e);
            }
        }
    }
}

impl Write for FanoutWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.for_each("write", |destination| destination.write_all(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.for_each("flush", |destination| destination.flush());
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FanoutWriter {
    type Writer = FanoutWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl std::fmt::Debug for FanoutWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutWriter")
            .field("destinations", &self.destinations.len())
            .finish()
    }
}
