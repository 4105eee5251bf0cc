//! Offline message source backed by JSONL dump files
//!
//! Reads one `<channel>.jsonl` file per channel from a dump directory,
//! one raw message per line, already ordered newest-first the way an
//! export tool writes them. This is the concrete source shipped with
//! the pipeline; live sources implement the same traits externally.

use crate::source::{MessageSource, MessageStream, SourceError, SourceFilter};
use async_trait::async_trait;
use ctistream_core::RawMessage;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Message source reading per-channel JSONL dumps
#[derive(Debug, Clone)]
pub struct JsonlFileSource {
    dir: PathBuf,
}

impl JsonlFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl MessageSource for JsonlFileSource {
    async fn open(
        &self,
        channel: &str,
        filter: &SourceFilter,
    ) -> Result<Box<dyn MessageStream>, SourceError> {
        let path = self.dir.join(format!("{channel}.jsonl"));
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SourceError::Channel {
                reason: format!("cannot read {}: {e}", path.display()),
            })?;

        let lines: VecDeque<(usize, String)> = content
            .lines()
            .enumerate()
            .map(|(n, l)| (n + 1, l.to_string()))
            .filter(|(_, l)| !l.trim().is_empty())
            .collect();

        Ok(Box::new(JsonlStream {
            lines,
            search: filter.search.as_ref().map(|s| s.to_lowercase()),
        }))
    }
}

struct JsonlStream {
    lines: VecDeque<(usize, String)>,
    search: Option<String>,
}

#[async_trait]
impl MessageStream for JsonlStream {
    async fn next(&mut self) -> Option<Result<RawMessage, SourceError>> {
        while let Some((line_number, line)) = self.lines.pop_front() {
            let raw: RawMessage = match serde_json::from_str(&line) {
                Ok(raw) => raw,
                Err(e) => {
                    return Some(Err(SourceError::Message {
                        id: line_number as i64,
                        reason: format!("malformed dump line: {e}"),
                    }));
                }
            };

            // Source-side keyword filter: non-matching messages are
            // simply not yielded, mirroring a search-filtered feed.
            if let Some(search) = &self.search {
                let matches = raw
                    .text
                    .as_deref()
                    .map(|t| t.to_lowercase().contains(search))
                    .unwrap_or(false);
                if !matches {
                    continue;
                }
            }

            return Some(Ok(raw));
        }
        None
    }
}
