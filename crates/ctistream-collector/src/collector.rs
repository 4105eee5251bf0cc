//! Budgeted, checkpointed collection loop
//!
//! Channels are scanned strictly one after another; each channel's
//! stream yields messages newest-first. Per message the window rules
//! are: below the date floor ends the channel (nothing older can
//! qualify), above the ceiling skips (ordering above the ceiling is
//! not guaranteed), in-window accepts. The run halts as a whole once
//! the message budget or the time budget is exhausted.

use crate::config::CollectorConfig;
use crate::progress::{estimate_remaining, format_elapsed, percent_complete};
use crate::snapshot::SnapshotWriter;
use crate::source::{MessageSource, SourceError, SourceFilter};
use ctistream_core::{Message, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of a finalized collection run
#[derive(Debug)]
pub struct CollectionOutcome {
    /// Accepted messages in acceptance order
    pub messages: Vec<Message>,

    /// Periodic checkpoints written during the run
    pub checkpoints_written: usize,

    /// Path of the terminal snapshot
    pub final_snapshot: PathBuf,
}

/// Stateful collector for one run
pub struct Collector {
    config: CollectorConfig,
    snapshots: SnapshotWriter,
}

enum ChannelEnd {
    /// Exhausted, date floor crossed, or budget reached
    Complete,
    /// Abandoned after a channel-level failure
    Aborted,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        let snapshots = SnapshotWriter::new(
            config.output_dir.clone(),
            config.file_stem.clone(),
            config.format,
        );
        Self { config, snapshots }
    }

    /// Run the collection loop to completion and persist the terminal
    /// snapshot.
    ///
    /// Per-message and per-channel failures are recovered here and
    /// never escape; only snapshot I/O errors propagate.
    pub async fn collect(&self, source: &dyn MessageSource) -> Result<CollectionOutcome> {
        let start = Instant::now();
        let filter = SourceFilter {
            search: self.config.search.clone(),
        };

        let mut accumulated: Vec<Message> = Vec::new();
        let mut checkpoints_written = 0usize;

        for channel in &self.config.channels {
            if self.budget_exhausted(&accumulated, start) {
                break;
            }

            let end = self
                .scan_channel(source, channel, &filter, start, &mut accumulated, &mut checkpoints_written)
                .await?;

            if let ChannelEnd::Complete = end {
                self.snapshots.write_channel_complete(&accumulated, channel)?;
                info!(channel = %channel, total = accumulated.len(), "channel completed");
            }

            // Unconditional pause between channels, rate-limit courtesy.
            tokio::time::sleep(self.config.backoff()).await;
        }

        let final_snapshot = self.snapshots.write_final(&accumulated)?;
        info!(
            total = accumulated.len(),
            elapsed = %format_elapsed(start.elapsed()),
            path = %final_snapshot.display(),
            "collection run finalized"
        );

        Ok(CollectionOutcome {
            messages: accumulated,
            checkpoints_written,
            final_snapshot,
        })
    }

    async fn scan_channel(
        &self,
        source: &dyn MessageSource,
        channel: &str,
        filter: &SourceFilter,
        start: Instant,
        accumulated: &mut Vec<Message>,
        checkpoints_written: &mut usize,
    ) -> Result<ChannelEnd> {
        let mut stream = match source.open(channel, filter).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(channel, error = %e, "failed to open channel, skipping");
                return Ok(ChannelEnd::Aborted);
            }
        };

        let mut channel_count = 0usize;
        while let Some(item) = stream.next().await {
            let raw = match item {
                Ok(raw) => raw,
                Err(SourceError::Message { id, reason }) => {
                    warn!(channel, id, reason = %reason, "skipping malformed message");
                    continue;
                }
                Err(e @ SourceError::Channel { .. }) => {
                    warn!(channel, error = %e, "channel failure, abandoning channel");
                    return Ok(ChannelEnd::Aborted);
                }
            };

            if raw.timestamp < self.config.date_min {
                // Newest-first ordering: nothing older can be in range.
                debug!(channel, id = raw.id, "date floor crossed, channel done");
                break;
            }
            if raw.timestamp > self.config.date_max {
                continue;
            }

            accumulated.push(Message::from_raw(channel, &raw));
            channel_count += 1;

            let elapsed = start.elapsed();
            debug!(
                channel,
                id = raw.id,
                channel_count,
                total = accumulated.len(),
                percent = percent_complete(accumulated.len(), self.config.message_budget),
                elapsed = %format_elapsed(elapsed),
                remaining = %estimate_remaining(accumulated.len(), self.config.message_budget, elapsed)
                    .map(format_elapsed)
                    .unwrap_or_else(|| "--:--:--:--".to_string()),
                "message accepted"
            );

            if self.config.checkpoint_interval > 0
                && accumulated.len() % self.config.checkpoint_interval == 0
            {
                self.snapshots.write_checkpoint(accumulated, channel)?;
                *checkpoints_written += 1;
            }

            if self.budget_exhausted(accumulated, start) {
                info!(
                    channel,
                    total = accumulated.len(),
                    "budget exhausted, halting run"
                );
                break;
            }
        }

        Ok(ChannelEnd::Complete)
    }

    fn budget_exhausted(&self, accumulated: &[Message], start: Instant) -> bool {
        accumulated.len() >= self.config.message_budget
            || start.elapsed() >= self.config.time_budget()
    }
}
