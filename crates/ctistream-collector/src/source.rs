//! Message source seam
//!
//! The collector consumes any paginated message source that can yield
//! raw messages for a channel in descending-timestamp order. The real
//! source is an external collaborator; tests and offline runs plug in
//! their own implementations.

use async_trait::async_trait;
use ctistream_core::RawMessage;

/// Error raised by a message source.
///
/// The two kinds drive different recovery in the collector: a
/// `Message` error skips one item, a `Channel` error abandons the
/// channel and moves on after backoff.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// One message could not be fetched or decoded
    #[error("message {id}: {reason}")]
    Message { id: i64, reason: String },

    /// The channel itself is unreachable (connectivity, auth, ...)
    #[error("channel failure: {reason}")]
    Channel { reason: String },
}

/// Optional source-side filtering applied while paginating
#[derive(Debug, Clone, Default)]
pub struct SourceFilter {
    /// Keyword search forwarded to the source, if supported
    pub search: Option<String>,
}

/// A lazy stream of raw messages for one channel, newest first
#[async_trait]
pub trait MessageStream: Send {
    /// Next message, or `None` when the channel is exhausted.
    ///
    /// Item-level errors are yielded inline so the caller can skip a
    /// single bad message without losing the stream.
    async fn next(&mut self) -> Option<Result<RawMessage, SourceError>>;
}

/// Factory for per-channel message streams; restartable per channel
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn open(
        &self,
        channel: &str,
        filter: &SourceFilter,
    ) -> Result<Box<dyn MessageStream>, SourceError>;
}
