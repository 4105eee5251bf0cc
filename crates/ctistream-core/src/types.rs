//! Core types for ctistream

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single reaction on a source message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Emoji or reaction symbol as provided by the source
    pub emoji: String,

    /// Number of times this reaction was applied
    pub count: u64,
}

/// A raw message as exposed by the message source, before normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    /// Source-assigned message id, unique within a channel
    pub id: i64,

    /// Message body; absent for media-only posts
    pub text: Option<String>,

    /// Publication timestamp
    pub timestamp: DateTime<Utc>,

    /// View counter, if the source exposes one
    pub views: Option<i64>,

    /// Reactions in source-provided order
    pub reactions: Vec<Reaction>,

    /// Forward/share counter, if the source exposes one
    pub forwards: Option<i64>,
}

/// A collected message after normalization and metadata extraction.
///
/// Identity is `(source_channel, external_id)`; immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Channel the message was collected from
    pub source_channel: String,

    /// Original message body
    pub raw_text: String,

    /// Body with unsupported characters stripped
    pub normalized_text: String,

    /// Publication timestamp
    pub timestamp: DateTime<Utc>,

    /// Source-assigned message id
    pub external_id: i64,

    /// View counter, if available
    pub view_count: Option<i64>,

    /// Reactions folded into repeated `"<emoji> <count> "` tokens
    pub reaction_summary: String,

    /// Forward/share counter, if available
    pub share_count: Option<i64>,
}

impl Message {
    /// Build a collected message from a raw source message.
    ///
    /// Normalizes the body and folds reactions into the summary string,
    /// preserving source order.
    pub fn from_raw(channel: impl Into<String>, raw: &RawMessage) -> Self {
        let raw_text = raw.text.clone().unwrap_or_default();
        let normalized_text = crate::normalize::normalize(raw.text.as_deref());

        let mut reaction_summary = String::new();
        for reaction in &raw.reactions {
            reaction_summary.push_str(&reaction.emoji);
            reaction_summary.push(' ');
            reaction_summary.push_str(&reaction.count.to_string());
            reaction_summary.push(' ');
        }

        Self {
            source_channel: channel.into(),
            raw_text,
            normalized_text,
            timestamp: raw.timestamp,
            external_id: raw.id,
            view_count: raw.views,
            reaction_summary,
            share_count: raw.forwards,
        }
    }
}

/// Binary classification label: CTI-relevant or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Cyber-threat-intelligence relevant
    Cti,
    /// Everything else
    NonCti,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Cti => write!(f, "CTI"),
            Label::NonCti => write!(f, "Non-CTI"),
        }
    }
}

/// A message with its derived classification label.
///
/// The label is computed from `normalized_text` and the trained model;
/// it is never mutated after assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledMessage {
    /// The underlying collected message
    pub message: Message,

    /// Classifier-assigned label
    pub label: Label,
}

/// Confidence tier assigned by cross-validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    /// Independent corroborating evidence was found
    KnownThreat,
    /// No external corroboration yet
    EarlySignal,
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceTier::KnownThreat => write!(f, "Known Threat"),
            ConfidenceTier::EarlySignal => write!(f, "Early Signal"),
        }
    }
}

/// One cross-validated CTI message with its supporting evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// The validated message text (as queried, untruncated)
    pub message: String,

    /// Confidence tier derived from evidence presence
    pub confidence_tier: ConfidenceTier,

    /// Rendered evidence snippets, or the no-validation placeholder
    pub evidence_text: String,
}
