//! ctistream Collector
//!
//! Stateful streaming collector: iterates paginated message sources
//! under a count-and-time budget, applies date-window filtering,
//! checkpoints partial results, and finalizes a complete dataset.
//!
//! Per-message failures are skipped, channel failures abandon only
//! that channel; neither escapes the collector.

pub mod collector;
pub mod config;
pub mod jsonl_source;
pub mod progress;
pub mod snapshot;
pub mod source;

pub use collector::{CollectionOutcome, Collector};
pub use config::CollectorConfig;
pub use jsonl_source::JsonlFileSource;
pub use snapshot::{SnapshotFormat, SnapshotWriter};
pub use source::{MessageSource, MessageStream, SourceError, SourceFilter};
