//! Evidence source seam and snippet rendering

use async_trait::async_trait;
use ctistream_core::Result;
use serde::{Deserialize, Serialize};

/// Ranked snippets rendered into an evidence blob
pub const MAX_RENDERED_HITS: usize = 5;

/// Summaries longer than this are truncated with an ellipsis
pub const MAX_SUMMARY_CHARS: usize = 1000;

/// One ranked search snippet from the evidence source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceHit {
    pub title: String,
    pub url: String,
    pub published_date: Option<String>,
    pub summary: Option<String>,
}

/// External corpus queried once per candidate message.
///
/// Treated as a black box returning ranked snippets; an empty result
/// is a valid outcome, not a failure.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<EvidenceHit>>;
}

/// Render the top hits into a single evidence string.
///
/// Returns the empty string for no hits, which downstream code reads
/// as "no corroboration found".
pub fn render_hits(hits: &[EvidenceHit]) -> String {
    let mut parts = Vec::new();
    for (idx, hit) in hits.iter().take(MAX_RENDERED_HITS).enumerate() {
        let mut summary = hit
            .summary
            .clone()
            .unwrap_or_else(|| "No summary available.".to_string());
        if summary.chars().count() > MAX_SUMMARY_CHARS {
            summary = summary.chars().take(MAX_SUMMARY_CHARS).collect::<String>() + "...";
        }
        parts.push(format!(
            "{}. Title: {}. URL: {}. Date: {}. Summary: {}.",
            idx + 1,
            hit.title,
            hit.url,
            hit.published_date.as_deref().unwrap_or("unknown"),
            summary
        ));
    }
    parts.join(" ")
}
