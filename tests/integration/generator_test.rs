//! Demo generator toggle integration tests

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;

use crate::common::{eventually, reader, spawn_default, spawn_server, test_config, TestServer};

const WAIT: Duration = Duration::from_secs(5);

async fn status(server: &TestServer) -> bool {
    let body: Value = server
        .client
        .get(server.url("/api/logs/dummy/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["active"].as_bool().unwrap()
}

async fn toggle(server: &TestServer, enable: bool) -> (reqwest::StatusCode, Value) {
    let response = server
        .client
        .post(server.url("/api/logs/dummy"))
        .json(&json!({ "enable": enable }))
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_toggle_round_trip() {
    let server = spawn_default().await;
    assert!(!status(&server).await);

    let (code, body) = toggle(&server, true).await;
    assert_eq!(code, reqwest::StatusCode::OK);
    assert_eq!(body, json!({"message": "Dummy logs enabled"}));
    assert!(status(&server).await);

    let (_, body) = toggle(&server, true).await;
    assert_eq!(body, json!({"message": "Already active"}));

    let (_, body) = toggle(&server, false).await;
    assert_eq!(body, json!({"message": "Dummy logs disabled"}));
    assert!(!status(&server).await);

    let (code, body) = toggle(&server, false).await;
    assert_eq!(code, reqwest::StatusCode::OK);
    assert_eq!(body, json!({"message": "Already inactive"}));

    server.stop().await;
}

#[tokio::test]
async fn test_generated_lines_reach_sse_clients_and_stop() {
    let server = spawn_default().await;
    let response = server.client.get(server.url("/api/logs")).send().await.unwrap();
    assert!(eventually(WAIT, || server.hub.subscriber_count() == 1).await);

    toggle(&server, true).await;
    let mut sse = reader(response);
    assert!(sse.read_until("[DUMMY]", WAIT).await);
    assert!(sse.received.contains(r#"data: {"time":"#));

    toggle(&server, false).await;
    let published = server.hub.stats().published;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(server.hub.stats().published, published);

    server.stop().await;
}

async fn post_raw(server: &TestServer, body: &'static str) -> (reqwest::StatusCode, Value) {
    let response = server
        .client
        .post(server.url("/api/logs/dummy"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_malformed_toggle_is_rejected() {
    let server = spawn_default().await;

    for body in ["{", "{\"enable\": \"sometimes\"}", "{\"enable\": null}"] {
        let (code, value) = post_raw(&server, body).await;
        assert_eq!(code, reqwest::StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(value, json!({"error": "Invalid request", "status": 400}));
    }
    assert!(!status(&server).await);

    server.stop().await;
}

#[tokio::test]
async fn test_missing_enable_disables() {
    let server = spawn_default().await;
    toggle(&server, true).await;
    assert!(status(&server).await);

    let (code, value) = post_raw(&server, "{}").await;
    assert_eq!(code, reqwest::StatusCode::OK);
    assert_eq!(value, json!({"message": "Dummy logs disabled"}));
    assert!(!status(&server).await);

    let (code, value) = post_raw(&server, "").await;
    assert_eq!(code, reqwest::StatusCode::OK);
    assert_eq!(value, json!({"message": "Already inactive"}));

    server.stop().await;
}

#[tokio::test]
async fn test_autostart() {
    let mut config = test_config();
    config.generator.autostart = true;
    let server = spawn_server(config).await;

    assert!(status(&server).await);
    assert!(eventually(WAIT, || server.hub.stats().published > 0).await);

    server.stop().await;
}
