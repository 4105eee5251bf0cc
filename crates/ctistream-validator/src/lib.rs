//! ctistream Validator
//!
//! Cross-validates CTI-labeled messages against an external search
//! corpus, partitioning them into confidence tiers by evidence
//! presence.

pub mod evidence;
pub mod exa;
pub mod validator;

pub use evidence::{render_hits, EvidenceHit, EvidenceSource, MAX_RENDERED_HITS, MAX_SUMMARY_CHARS};
pub use exa::ExaSearchClient;
pub use validator::{Validator, NO_VALIDATION_PLACEHOLDER, QUERY_PREFIX_CHARS};
