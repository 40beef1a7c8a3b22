//! Line assembly for byte-stream sinks
//!
//! `io::Write` gives no promise that one call carries one whole line:
//! `writeln!` with arguments issues a write per format piece. [`LineBuffer`]
//! holds the unterminated tail of the stream and hands out complete lines
//! only once their `\n` arrives.

/// Longest partial line held back before it is emitted as-is.
pub const MAX_PENDING_LINE: usize = 16 * 1024;

/// Partial-line buffer shared by the hub and pane write sinks.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `buf` and call `emit` for every line it completes.
    ///
    /// Lines are passed without their terminator; a trailing `\r` is trimmed.
    /// A tail longer than [`MAX_PENDING_LINE`] is emitted without waiting.
    pub fn feed<F>(&mut self, buf: &[u8], mut emit: F)
    where
        F: FnMut(&str),
    {
        let mut rest = buf;
        while let Some(end) = rest.iter().position(|&b| b == b'\n') {
            self.pending.extend_from_slice(&rest[..end]);
            self.emit_pending(&mut emit);
            rest = &rest[end + 1..];
        }
        self.pending.extend_from_slice(rest);
        if self.pending.len() >= MAX_PENDING_LINE {
            self.emit_pending(&mut emit);
        }
    }

    /// Emit whatever unterminated text is still held.
    pub fn finish<F>(&mut self, mut emit: F)
    where
        F: FnMut(&str),
    {
        if !self.pending.is_empty() {
            self.emit_pending(&mut emit);
        }
    }

    /// Bytes waiting for a line terminator
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn emit_pending<F>(&mut self, emit: &mut F)
    where
        F: FnMut(&str),
    {
        {
            let text = String::from_utf8_lossy(&self.pending);
            emit(text.trim_end_matches('\r'));
        }
        self.pending.clear();
    }
}
