//! Snapshot persistence for in-progress and final collection output
//!
//! Snapshots are crash-recovery insurance, written periodically, at
//! channel completion, and at run completion. The primary format is
//! columnar (Parquet); JSONL is available as a line-oriented fallback.

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use ctistream_core::{Error, Message, Result};
use parquet::arrow::ArrowWriter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Snapshot file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Parquet,
    Jsonl,
}

impl SnapshotFormat {
    fn extension(&self) -> &'static str {
        match self {
            SnapshotFormat::Parquet => "parquet",
            SnapshotFormat::Jsonl => "jsonl",
        }
    }
}

/// Writes accumulator snapshots under a fixed directory and file stem
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
    stem: String,
    format: SnapshotFormat,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>, format: SnapshotFormat) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            format,
        }
    }

    /// Periodic checkpoint of the accumulator-so-far.
    pub fn write_checkpoint(&self, messages: &[Message], channel: &str) -> Result<PathBuf> {
        let name = format!(
            "backup_{}_{:05}_{}.{}",
            self.stem,
            messages.len(),
            channel,
            self.format.extension()
        );
        self.write(&name, messages)
    }

    /// Snapshot written when one channel finishes cleanly.
    pub fn write_channel_complete(&self, messages: &[Message], channel: &str) -> Result<PathBuf> {
        let name = format!(
            "complete_{}_{}_{:05}.{}",
            channel,
            self.stem,
            messages.len(),
            self.format.extension()
        );
        self.write(&name, messages)
    }

    /// Terminal snapshot covering the whole accumulator.
    pub fn write_final(&self, messages: &[Message]) -> Result<PathBuf> {
        let name = format!(
            "FINAL_{}_with_{:05}.{}",
            self.stem,
            messages.len(),
            self.format.extension()
        );
        self.write(&name, messages)
    }

    fn write(&self, name: &str, messages: &[Message]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        match self.format {
            SnapshotFormat::Parquet => write_parquet(&path, messages)?,
            SnapshotFormat::Jsonl => write_jsonl(&path, messages)?,
        }
        debug!(path = %path.display(), rows = messages.len(), "snapshot written");
        Ok(path)
    }
}

fn schema() -> Schema {
    Schema::new(vec![
        Field::new("type", DataType::Utf8, false),
        Field::new("group", DataType::Utf8, false),
        Field::new("content", DataType::Utf8, false),
        Field::new("date", DataType::Utf8, false),
        Field::new("message_id", DataType::Int64, false),
        Field::new("views", DataType::Int64, true),
        Field::new("reactions", DataType::Utf8, false),
        Field::new("shares", DataType::Int64, true),
    ])
}

fn write_parquet(path: &Path, messages: &[Message]) -> Result<()> {
    let schema = Arc::new(schema());

    let kinds = StringArray::from(vec!["text"; messages.len()]);
    let groups =
        StringArray::from(messages.iter().map(|m| m.source_channel.clone()).collect::<Vec<_>>());
    let contents =
        StringArray::from(messages.iter().map(|m| m.normalized_text.clone()).collect::<Vec<_>>());
    let dates = StringArray::from(
        messages
            .iter()
            .map(|m| m.timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
            .collect::<Vec<_>>(),
    );
    let ids = Int64Array::from(messages.iter().map(|m| m.external_id).collect::<Vec<_>>());
    let views = Int64Array::from(messages.iter().map(|m| m.view_count).collect::<Vec<_>>());
    let reactions =
        StringArray::from(messages.iter().map(|m| m.reaction_summary.clone()).collect::<Vec<_>>());
    let shares = Int64Array::from(messages.iter().map(|m| m.share_count).collect::<Vec<_>>());

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(kinds) as ArrayRef,
            Arc::new(groups),
            Arc::new(contents),
            Arc::new(dates),
            Arc::new(ids),
            Arc::new(views),
            Arc::new(reactions),
            Arc::new(shares),
        ],
    )
    .map_err(|e| Error::collector(format!("record batch for {}: {e}", path.display())))?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)
        .map_err(|e| Error::collector(format!("parquet writer for {}: {e}", path.display())))?;
    writer
        .write(&batch)
        .map_err(|e| Error::collector(format!("parquet write to {}: {e}", path.display())))?;
    writer
        .close()
        .map_err(|e| Error::collector(format!("parquet close of {}: {e}", path.display())))?;
    Ok(())
}

fn write_jsonl(path: &Path, messages: &[Message]) -> Result<()> {
    let mut file = File::create(path)?;
    for message in messages {
        let line = serde_json::to_string(message)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
    }
    Ok(())
}
