//! Health, statistics and static dashboard endpoints

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::time::Duration;

use crate::common::{eventually, spawn_default, spawn_server, test_config};

#[tokio::test]
async fn test_health() {
    let server = spawn_default().await;
    let response = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
    server.stop().await;
}

#[tokio::test]
async fn test_stats_reports_subscribers() {
    let server = spawn_default().await;
    let _stream = server.client.get(server.url("/api/logs")).send().await.unwrap();
    assert!(eventually(Duration::from_secs(5), || server.hub.subscriber_count() == 1).await);
    server.hub.publish("counted");

    let stats: Value = server
        .client
        .get(server.url("/api/logs/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["subscribers"], 1);
    assert_eq!(stats["published"], 1);
    assert_eq!(stats["queues"][0]["capacity"], 64);
    assert!(stats["queues"][0]["id"].is_string());

    server.stop().await;
}

#[tokio::test]
async fn test_static_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>monitoring</h1>").unwrap();
    let mut config = test_config();
    config.server.static_dir = dir.path().to_string_lossy().into_owned();
    let server = spawn_server(config).await;

    let index = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(index.status(), reqwest::StatusCode::OK);
    assert_eq!(index.text().await.unwrap(), "<h1>monitoring</h1>");

    let missing = server.client.get(server.url("/nope.js")).send().await.unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    server.stop().await;
}
