//! Live log stream integration tests

use pretty_assertions::assert_eq;
use std::time::Duration;

use crate::common::{eventually, reader, spawn_default, spawn_server, test_config};

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_stream_headers_and_framing() {
    let server = spawn_default().await;
    let response = server.client.get(server.url("/api/logs")).send().await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");
    assert_eq!(response.headers()["cache-control"], "no-cache");

    assert!(eventually(WAIT, || server.hub.subscriber_count() == 1).await);
    server.hub.publish("hello from test");
    server.hub.publish("two\nlines");

    let mut sse = reader(response);
    assert!(sse.read_until("data: two\ndata: lines\n\n", WAIT).await, "got {:?}", sse.received);
    assert!(sse.received.contains("data: hello from test\n\n"));
    let first = sse.received.find("hello from test").unwrap();
    let second = sse.received.find("data: two").unwrap();
    assert!(first < second);

    server.stop().await;
}

#[tokio::test]
async fn test_every_client_receives_every_line() {
    let server = spawn_default().await;
    let a = server.client.get(server.url("/api/logs")).send().await.unwrap();
    let b = server.client.get(server.url("/api/logs")).send().await.unwrap();
    assert!(eventually(WAIT, || server.hub.subscriber_count() == 2).await);

    server.hub.publish("fan out");

    let mut a = reader(a);
    let mut b = reader(b);
    assert!(a.read_until("data: fan out\n\n", WAIT).await);
    assert!(b.read_until("data: fan out\n\n", WAIT).await);

    server.stop().await;
}

#[tokio::test]
async fn test_client_disconnect_unsubscribes() {
    let server = spawn_default().await;
    let keep = server.client.get(server.url("/api/logs")).send().await.unwrap();
    let leaving = server.client.get(server.url("/api/logs")).send().await.unwrap();
    assert!(eventually(WAIT, || server.hub.subscriber_count() == 2).await);

    drop(leaving);

    // The server notices the closed connection at the latest on its next write.
    let hub = server.hub.clone();
    let released = eventually(WAIT, || {
        hub.publish("ping");
        hub.subscriber_count() == 1
    })
    .await;
    assert!(released, "subscription of the disconnected client was not released");

    // The remaining client is unaffected.
    server.hub.publish("still here");
    let mut keep = reader(keep);
    assert!(keep.read_until("data: still here\n\n", WAIT).await);

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_ends_streams() {
    let server = spawn_default().await;
    let response = server.client.get(server.url("/api/logs")).send().await.unwrap();
    assert!(eventually(WAIT, || server.hub.subscriber_count() == 1).await);

    server.shutdown.cancel();
    let mut sse = reader(response);
    assert!(sse.read_to_end(WAIT).await, "stream kept running after shutdown");
    assert_eq!(server.hub.subscriber_count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn test_idle_stream_gets_keep_alive() {
    let mut config = test_config();
    config.hub.keep_alive_secs = 1;
    let server = spawn_server(config).await;

    let response = server.client.get(server.url("/api/logs")).send().await.unwrap();
    let mut sse = reader(response);
    assert!(sse.read_until(": keep-alive\n\n", Duration::from_secs(3)).await);

    server.stop().await;
}

#[tokio::test]
async fn test_cpu_stream() {
    let server = spawn_default().await;
    let response = server.client.get(server.url("/api/cpu")).send().await.unwrap();
    assert_eq!(response.headers()["content-type"], "text/event-stream");

    let mut sse = reader(response);
    assert!(sse.read_until("\n\n", WAIT).await);
    let value = sse
        .received
        .split("\n\n")
        .next()
        .and_then(|frame| frame.strip_prefix("data: "))
        .unwrap();
    let usage: f32 = value.parse().unwrap();
    assert!(usage >= 0.0);
    assert_eq!(value.split('.').nth(1).map(str::len), Some(2));

    server.stop().await;
}
