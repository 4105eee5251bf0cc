//! Integration tests for the collection loop

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use ctistream_collector::{
    Collector, CollectorConfig, MessageSource, MessageStream, SnapshotFormat, SourceError,
    SourceFilter,
};
use ctistream_core::RawMessage;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::path::Path;

/// Scripted per-channel stream items
#[derive(Clone)]
enum StubItem {
    Message(RawMessage),
    BadMessage(i64),
    ChannelFailure,
}

/// In-memory message source scripted per channel
#[derive(Default)]
struct StubSource {
    channels: HashMap<String, Vec<StubItem>>,
}

impl StubSource {
    fn with_channel(mut self, channel: &str, items: Vec<StubItem>) -> Self {
        self.channels.insert(channel.to_string(), items);
        self
    }
}

#[async_trait]
impl MessageSource for StubSource {
    async fn open(
        &self,
        channel: &str,
        _filter: &SourceFilter,
    ) -> Result<Box<dyn MessageStream>, SourceError> {
        let items = self
            .channels
            .get(channel)
            .cloned()
            .ok_or_else(|| SourceError::Channel {
                reason: format!("unknown channel {channel}"),
            })?;
        Ok(Box::new(StubStream {
            items: items.into(),
        }))
    }
}

struct StubStream {
    items: VecDeque<StubItem>,
}

#[async_trait]
impl MessageStream for StubStream {
    async fn next(&mut self) -> Option<Result<RawMessage, SourceError>> {
        match self.items.pop_front()? {
            StubItem::Message(raw) => Some(Ok(raw)),
            StubItem::BadMessage(id) => Some(Err(SourceError::Message {
                id,
                reason: "scripted failure".to_string(),
            })),
            StubItem::ChannelFailure => Some(Err(SourceError::Channel {
                reason: "scripted outage".to_string(),
            })),
        }
    }
}

fn at(timestamp: DateTime<Utc>, id: i64) -> StubItem {
    StubItem::Message(RawMessage {
        id,
        text: Some(format!("message {id}")),
        timestamp,
        views: None,
        reactions: Vec::new(),
        forwards: None,
    })
}

fn window_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap()
}

fn window_end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 15, 0, 0, 0).unwrap()
}

fn config(channels: &[&str], output_dir: &Path) -> CollectorConfig {
    CollectorConfig {
        channels: channels.iter().map(|c| c.to_string()).collect(),
        date_min: window_start(),
        date_max: window_end(),
        message_budget: 100,
        time_budget_secs: 60,
        search: None,
        checkpoint_interval: 1000,
        backoff_secs: 0,
        output_dir: output_dir.to_path_buf(),
        file_stem: "test".to_string(),
        format: SnapshotFormat::Jsonl,
    }
}

#[tokio::test]
async fn date_window_boundaries_are_inclusive() {
    let dir = tempfile::tempdir().unwrap();
    let in_window = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();

    // Newest first: above ceiling (skip), at ceiling (accept), mid
    // (accept), at floor (accept), one microsecond below floor (halt),
    // then a message that must never be reached.
    let source = StubSource::default().with_channel(
        "@chan",
        vec![
            at(window_end() + chrono::Duration::microseconds(1), 6),
            at(window_end(), 5),
            at(in_window, 4),
            at(window_start(), 3),
            at(window_start() - chrono::Duration::microseconds(1), 2),
            at(in_window, 1),
        ],
    );

    let collector = Collector::new(config(&["@chan"], dir.path()));
    let outcome = collector.collect(&source).await.unwrap();

    let ids: Vec<i64> = outcome.messages.iter().map(|m| m.external_id).collect();
    assert_eq!(ids, vec![5, 4, 3]);
}

#[tokio::test]
async fn message_budget_truncates_second_channel_mid_stream() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();

    let source = StubSource::default()
        .with_channel("@a", vec![at(ts, 1), at(ts, 2), at(ts, 3)])
        .with_channel("@b", vec![at(ts, 4), at(ts, 5), at(ts, 6)]);

    let mut cfg = config(&["@a", "@b"], dir.path());
    cfg.message_budget = 5;
    let outcome = Collector::new(cfg).collect(&source).await.unwrap();

    assert_eq!(outcome.messages.len(), 5);
    let ids: Vec<i64> = outcome.messages.iter().map(|m| m.external_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn exhausted_time_budget_halts_before_any_channel() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    let source = StubSource::default().with_channel("@chan", vec![at(ts, 1)]);

    let mut cfg = config(&["@chan"], dir.path());
    cfg.time_budget_secs = 0;
    let outcome = Collector::new(cfg).collect(&source).await.unwrap();

    assert!(outcome.messages.is_empty());
    assert!(outcome.final_snapshot.exists(), "empty run still finalizes");
}

#[tokio::test]
async fn periodic_checkpoints_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    let items: Vec<StubItem> = (1..=5).map(|id| at(ts, id)).collect();
    let source = StubSource::default().with_channel("@chan", items);

    let mut cfg = config(&["@chan"], dir.path());
    cfg.checkpoint_interval = 2;
    let outcome = Collector::new(cfg).collect(&source).await.unwrap();

    assert_eq!(outcome.checkpoints_written, 2);
    assert!(dir.path().join("backup_test_00002_@chan.jsonl").exists());
    assert!(dir.path().join("backup_test_00004_@chan.jsonl").exists());
    assert!(dir.path().join("complete_@chan_test_00005.jsonl").exists());
    assert!(dir.path().join("FINAL_test_with_00005.jsonl").exists());
}

#[tokio::test]
async fn bad_messages_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    let source = StubSource::default().with_channel(
        "@chan",
        vec![at(ts, 1), StubItem::BadMessage(99), at(ts, 2)],
    );

    let collector = Collector::new(config(&["@chan"], dir.path()));
    let outcome = collector.collect(&source).await.unwrap();

    let ids: Vec<i64> = outcome.messages.iter().map(|m| m.external_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn channel_failure_abandons_only_that_channel() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    let source = StubSource::default()
        .with_channel("@broken", vec![at(ts, 1), StubItem::ChannelFailure, at(ts, 2)])
        .with_channel("@healthy", vec![at(ts, 3)]);

    let collector = Collector::new(config(&["@broken", "@healthy"], dir.path()));
    let outcome = collector.collect(&source).await.unwrap();

    let ids: Vec<i64> = outcome.messages.iter().map(|m| m.external_id).collect();
    assert_eq!(ids, vec![1, 3], "message after the failure must not arrive");

    // An abandoned channel gets no completion snapshot.
    assert!(!dir.path().join("complete_@broken_test_00001.jsonl").exists());
    assert!(dir.path().join("complete_@healthy_test_00002.jsonl").exists());
}

#[tokio::test]
async fn unknown_channel_does_not_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    let source = StubSource::default().with_channel("@known", vec![at(ts, 1)]);

    let collector = Collector::new(config(&["@missing", "@known"], dir.path()));
    let outcome = collector.collect(&source).await.unwrap();

    assert_eq!(outcome.messages.len(), 1);
}
