//! Collector configuration
//!
//! Immutable run configuration passed into the collector constructor;
//! nothing here is read from ambient state mid-run.

use crate::snapshot::SnapshotFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Channels to scan, in order
    pub channels: Vec<String>,

    /// Inclusive lower bound of the date window
    pub date_min: DateTime<Utc>,

    /// Inclusive upper bound of the date window
    pub date_max: DateTime<Utc>,

    /// Maximum number of accepted messages across all channels
    #[serde(default = "default_message_budget")]
    pub message_budget: usize,

    /// Wall-clock budget for the whole run, in seconds
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: u64,

    /// Keyword search forwarded to the source, if any
    #[serde(default)]
    pub search: Option<String>,

    /// Accepted messages between periodic checkpoints
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,

    /// Pause between channels, in seconds (rate-limit courtesy)
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,

    /// Directory snapshots are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Run identifier embedded in snapshot filenames
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Snapshot file format
    #[serde(default)]
    pub format: SnapshotFormat,
}

impl CollectorConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_secs(self.time_budget_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}

fn default_message_budget() -> usize {
    20_000
}

fn default_time_budget_secs() -> u64 {
    21_600 // 6 hours
}

fn default_checkpoint_interval() -> usize {
    1000
}

fn default_backoff_secs() -> u64 {
    2
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_file_stem() -> String {
    "cti-extraction".to_string()
}
