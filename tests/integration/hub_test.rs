//! Hub behaviour through the public API

use livetail::backend::hub::LogHub;
use livetail::backend::producers::{FanoutWriter, HubWriter};
use livetail::shared::LogLevel;
use livetail::tui::LogPane;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::time::Duration;

fn texts(lines: Vec<livetail::shared::LogLine>) -> Vec<String> {
    lines.into_iter().map(|l| l.as_str().to_string()).collect()
}

#[test]
fn test_join_late_scenario() {
    let hub = LogHub::new(16);
    let mut s1 = hub.subscribe();
    hub.publish("a");
    hub.publish("b");
    let mut s2 = hub.subscribe();
    hub.publish("c");

    assert_eq!(texts(s1.drain()), vec!["a", "b", "c"]);
    assert_eq!(texts(s2.drain()), vec!["c"]);
}

#[test]
fn test_slow_subscriber_scenario() {
    let hub = LogHub::new(16);
    let mut s1 = hub.subscribe_with_capacity(2);
    for line in ["1", "2", "3"] {
        hub.publish(line);
    }
    assert_eq!(texts(s1.drain()), vec!["2", "3"]);
}

#[test]
fn test_logger_and_pane_share_one_write() {
    let hub = LogHub::new(16);
    let mut subscription = hub.subscribe();
    let pane = LogPane::new(15);
    let mut writer = FanoutWriter::new()
        .with(HubWriter::new(hub.clone()))
        .with(pane.clone());

    writer.write_all(b"10:00:00 ERROR payment gateway timeout\n").unwrap();

    assert_eq!(
        texts(subscription.drain()),
        vec!["10:00:00 ERROR payment gateway timeout"]
    );
    let entries = pane.snapshot();
    assert_eq!(entries[0].level, LogLevel::Error);
    assert_eq!(entries[0].message, "payment gateway timeout");
}

#[tokio::test]
async fn test_consumer_task_waits_for_lines() {
    let hub = LogHub::new(16);
    let mut subscription = hub.subscribe();

    let consumer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while let Some(line) = subscription.recv().await {
            seen.push(line.as_str().to_string());
            if seen.len() == 3 {
                break;
            }
        }
        seen
    });

    for line in ["x", "y", "z"] {
        tokio::time::sleep(Duration::from_millis(5)).await;
        hub.publish(line);
    }

    let seen = tokio::time::timeout(Duration::from_secs(2), consumer)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(seen, vec!["x", "y", "z"]);
    assert_eq!(hub.subscriber_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_producers_many_consumers() {
    let hub = LogHub::new(4096);
    let consumers: Vec<_> = (0..8)
        .map(|_| {
            let mut subscription = hub.subscribe();
            tokio::spawn(async move {
                let mut count = 0usize;
                while let Some(_line) = subscription.recv().await {
                    count += 1;
                    if count == 2000 {
                        break;
                    }
                }
                count
            })
        })
        .collect();

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let hub = hub.clone();
            tokio::spawn(async move {
                for i in 0..500 {
                    hub.publish(format!("{}-{}", p, i));
                }
            })
        })
        .collect();

    for producer in producers {
        producer.await.unwrap();
    }
    for consumer in consumers {
        let count = tokio::time::timeout(Duration::from_secs(5), consumer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(count, 2000);
    }
    assert_eq!(hub.subscriber_count(), 0);
    assert_eq!(hub.stats().dropped, 0);
}
