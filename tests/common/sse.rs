//! Server-Sent Events reading helpers

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::time::Duration;

/// Accumulates an SSE body until the wanted text shows up
pub struct SseReader<S> {
    body: S,
    pub received: String,
}

impl<S> SseReader<S>
where
    S: Stream<Item = reqwest::Result<Bytes>> + Unpin,
{
    pub fn new(body: S) -> Self {
        Self {
            body,
            received: String::new(),
        }
    }

    /// Read until `needle` has been received. Returns false on timeout or
    /// end of stream.
    pub async fn read_until(&mut self, needle: &str, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while !self.received.contains(needle) {
            let next = match tokio::time::timeout_at(deadline, self.body.next()).await {
                Ok(next) => next,
                Err(_) => return false,
            };
            match next {
                Some(Ok(chunk)) => self.received.push_str(&String::from_utf8_lossy(&chunk)),
                _ => return false,
            }
        }
        true
    }

    /// Wait for the stream to end, discarding anything left
    pub async fn read_to_end(&mut self, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        loop {
            match tokio::time::timeout_at(deadline, self.body.next()).await {
                Ok(Some(Ok(chunk))) => self.received.push_str(&String::from_utf8_lossy(&chunk)),
                Ok(Some(Err(_))) | Ok(None) => return true,
                Err(_) => return false,
            }
        }
    }
}

/// Open an SSE response as a reader
pub fn reader(response: reqwest::Response) -> SseReader<impl Stream<Item = reqwest::Result<Bytes>> + Unpin> {
    SseReader::new(Box::pin(response.bytes_stream()))
}
