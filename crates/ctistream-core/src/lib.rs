//! ctistream Core
//!
//! Core types, errors, and utilities shared across ctistream components.
//!
//! This crate provides:
//! - Domain types for raw/collected/labeled messages and evidence records
//! - Error types and result handling
//! - Text normalization for message bodies

pub mod error;
pub mod normalize;
pub mod types;

pub use error::{Error, Result};
pub use normalize::normalize;
pub use types::{
    ConfidenceTier, EvidenceRecord, Label, LabeledMessage, Message, RawMessage, Reaction,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::normalize::normalize;
    pub use crate::types::{
        ConfidenceTier, EvidenceRecord, Label, LabeledMessage, Message, RawMessage, Reaction,
    };
}
