//! Cross-validation of CTI messages into confidence tiers
//!
//! Each candidate message is truncated into a search query and checked
//! against the evidence source exactly once. Non-empty evidence makes
//! the message a known threat; empty evidence makes it an early
//! signal. The partition is total: there is no ambiguous case.
//!
//! Failure policy: a message whose evidence query errors is logged and
//! excluded from the result (fail-soft per message, not fail-fast for
//! the batch). Empty evidence is a valid outcome and never retried.

use crate::evidence::{render_hits, EvidenceSource};
use ctistream_core::{ConfidenceTier, EvidenceRecord};
use tracing::{info, warn};

/// Query prefix length, in characters
pub const QUERY_PREFIX_CHARS: usize = 200;

/// Placeholder evidence text for uncorroborated messages
pub const NO_VALIDATION_PLACEHOLDER: &str = "No external validation found";

/// Cross-validates candidate messages against an evidence source
pub struct Validator<S: EvidenceSource> {
    source: S,
}

impl<S: EvidenceSource> Validator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying evidence source, for callers that query it
    /// directly (the standing threat-search pass).
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Validate the first `top_n` messages, in the order received.
    ///
    /// Callers are responsible for any pre-ranking. One record per
    /// successfully queried message; failed queries are excluded.
    pub async fn validate(&self, messages: &[String], top_n: usize) -> Vec<EvidenceRecord> {
        let mut records = Vec::with_capacity(top_n.min(messages.len()));

        for message in messages.iter().take(top_n) {
            let query: String = message.chars().take(QUERY_PREFIX_CHARS).collect();

            let hits = match self.source.search(&query).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(error = %e, "evidence query failed, excluding message");
                    continue;
                }
            };

            let evidence_text = render_hits(&hits);
            let record = if evidence_text.trim().is_empty() {
                EvidenceRecord {
                    message: message.clone(),
                    confidence_tier: ConfidenceTier::EarlySignal,
                    evidence_text: NO_VALIDATION_PLACEHOLDER.to_string(),
                }
            } else {
                EvidenceRecord {
                    message: message.clone(),
                    confidence_tier: ConfidenceTier::KnownThreat,
                    evidence_text,
                }
            };
            records.push(record);
        }

        info!(
            validated = records.len(),
            known_threats = records
                .iter()
                .filter(|r| r.confidence_tier == ConfidenceTier::KnownThreat)
                .count(),
            "cross-validation completed"
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::EvidenceHit;
    use async_trait::async_trait;
    use ctistream_core::{Error, Result};
    use std::sync::Mutex;

    /// Evidence stub: scripted hit counts per call, recorded queries
    struct StubEvidence {
        queries: Mutex<Vec<String>>,
        script: Mutex<Vec<Result<Vec<EvidenceHit>>>>,
    }

    impl StubEvidence {
        fn new(script: Vec<Result<Vec<EvidenceHit>>>) -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                script: Mutex::new(script.into_iter().rev().collect()),
            }
        }
    }

    #[async_trait]
    impl EvidenceSource for StubEvidence {
        async fn search(&self, query: &str) -> Result<Vec<EvidenceHit>> {
            self.queries.lock().unwrap().push(query.to_string());
            self.script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn one_hit() -> Vec<EvidenceHit> {
        vec![EvidenceHit {
            title: "write-up".to_string(),
            url: "https://example.com/writeup".to_string(),
            published_date: Some("2025-09-02".to_string()),
            summary: Some("details".to_string()),
        }]
    }

    fn messages(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("cti candidate {i}")).collect()
    }

    #[tokio::test]
    async fn partition_is_total_and_tier_tracks_evidence() {
        let stub = StubEvidence::new(vec![Ok(Vec::new()), Ok(one_hit())]);
        let validator = Validator::new(stub);

        let records = validator.validate(&messages(2), 10).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].confidence_tier, ConfidenceTier::EarlySignal);
        assert_eq!(records[0].evidence_text, NO_VALIDATION_PLACEHOLDER);
        assert_eq!(records[1].confidence_tier, ConfidenceTier::KnownThreat);
        assert!(records[1].evidence_text.contains("write-up"));
    }

    #[tokio::test]
    async fn only_top_n_messages_are_processed() {
        let stub = StubEvidence::new(Vec::new());
        let validator = Validator::new(stub);

        let input = messages(15);
        let records = validator.validate(&input, 10).await;

        assert_eq!(records.len(), 10);
        for (record, message) in records.iter().zip(&input) {
            assert_eq!(&record.message, message);
        }
    }

    #[tokio::test]
    async fn query_is_truncated_to_prefix() {
        let stub = StubEvidence::new(Vec::new());
        let long_message = "a".repeat(500);
        let validator = Validator::new(stub);

        let _ = validator.validate(&[long_message], 1).await;
        let queries = validator.source.queries.lock().unwrap();
        assert_eq!(queries[0].chars().count(), QUERY_PREFIX_CHARS);
    }

    #[tokio::test]
    async fn failed_query_excludes_only_that_message() {
        let stub = StubEvidence::new(vec![
            Ok(one_hit()),
            Err(Error::evidence("scripted outage")),
            Ok(Vec::new()),
        ]);
        let validator = Validator::new(stub);

        let input = messages(3);
        let records = validator.validate(&input, 10).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, input[0]);
        assert_eq!(records[1].message, input[2]);
    }

    #[tokio::test]
    async fn record_keeps_untruncated_message() {
        let stub = StubEvidence::new(Vec::new());
        let long_message = "b".repeat(500);
        let validator = Validator::new(stub);

        let records = validator.validate(std::slice::from_ref(&long_message), 1).await;
        assert_eq!(records[0].message, long_message);
    }
}
