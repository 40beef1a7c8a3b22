/**
 * Live Log Stream Handler
 *
 * Server-Sent Events endpoint for `GET /api/logs`. Each request subscribes
 * to the hub and streams every line it receives:
 *
 * ```http
 * HTTP/1.1 200 OK
 * Content-Type: text/event-stream
 * Cache-Control: no-cache
 *
 * data: 14:03:22  INFO [Server] Listening on 0.0.0.0:3000
 *
 * : keep-alive
 *
 * ```
 *
 * # Connection Management
 *
 * - The subscription is owned by the response body stream. When the client
 *   disconnects the body is dropped, which drops the subscription and
 *   unsubscribes it.
 * - The stream ends when the server's shutdown token fires.
 * - After `hub.keep_alive_secs` without a line a comment frame is sent.
 *
 * Nothing in the per-line path logs through tracing: every tracing event is
 * itself published to the hub.
 */

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use bytes::{BufMut, Bytes, BytesMut};
use futures_util::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::backend::error::BackendError;
use crate::backend::hub::Subscription;
use crate::backend::server::state::AppState;

/// Comment frame sent on idle connections
pub const KEEP_ALIVE_FRAME: &[u8] = b": keep-alive\n\n";

/// Frame one payload as an SSE event.
///
/// `\r\n`, `\r` and `\n` all end a line in an event stream, so every line
/// of the payload becomes its own `data:` field and the frame can never be
/// split early.
pub fn sse_frame(payload: &str) -> Bytes {
    let payload = payload.trim_end_matches(['\r', '\n']);
    let mut frame = BytesMut::with_capacity(payload.len() + 8);
    for line in payload.split("\r\n").flat_map(|part| part.split(['\r', '\n'])) {
        frame.put_slice(b"data: ");
        frame.put_slice(line.as_bytes());
        frame.put_u8(b'\n');
    }
    frame.put_u8(b'\n');
    frame.freeze()
}

/// Body stream for one SSE client.
///
/// Ends when `cancel` fires; emits a keep-alive frame after `keep_alive` of
/// silence.
pub fn event_stream(
    subscription: Subscription,
    cancel: CancellationToken,
    keep_alive: Duration,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    let lines = Box::pin(subscription.into_stream(cancel));
    stream::unfold(lines, move |mut lines| async move {
        match tokio::time::timeout(keep_alive, lines.next()).await {
            Ok(Some(line)) => Some((Ok(sse_frame(line.as_str())), lines)),
            Ok(None) => None,
            Err(_) => Some((Ok(Bytes::from_static(KEEP_ALIVE_FRAME)), lines)),
        }
    })
}

/// Handle live log subscription (GET /api/logs)
pub async fn stream_logs(State(state): State<AppState>) -> Result<Response, BackendError> {
    let subscription = state.hub.subscribe();
    tracing::info!(
        "[Logs] SSE client connected ({} streaming)",
        state.hub.subscriber_count()
    );

    let body = Body::from_stream(event_stream(
        subscription,
        state.shutdown.child_token(),
        state.keep_alive,
    ));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .map_err(|e| BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
