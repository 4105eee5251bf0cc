//! Pipeline orchestration
//!
//! Stages run strictly one after another: the collector finishes its
//! whole run before classification, and classification before
//! validation, because each stage's output is the next stage's
//! complete input. Empty intermediate results are success states.

use crate::report::{ReportBundle, ReportGenerator};
use ctistream_classifier::{CtiClassifier, ModelStore};
use ctistream_collector::{Collector, CollectorConfig, MessageSource};
use ctistream_core::{EvidenceRecord, Label, LabeledMessage, Result};
use ctistream_validator::{EvidenceSource, Validator};
use std::path::PathBuf;
use tracing::info;

/// Topic for the cross-validation report bundle
pub const CROSS_VALIDATION_TOPIC: &str =
    "Telegram Cross-Validation: Weekly Top CTI Messages (Validated via evidence search)";

/// Standing query for the direct threat-search pass
pub const THREAT_SEARCH_QUERY: &str = "latest verified cybersecurity threats";

/// Topic for the direct threat-search report bundle
pub const THREAT_SEARCH_TOPIC: &str = "Latest verified cybersecurity threats";

/// Summary of one end-to-end pipeline run
#[derive(Debug)]
pub struct RunSummary {
    /// Messages accepted by the collector
    pub collected: usize,

    /// Messages labeled CTI
    pub cti_count: usize,

    /// Evidence records produced by cross-validation
    pub validated: Vec<EvidenceRecord>,

    /// Report artifact, when one was generated
    pub report_path: Option<PathBuf>,
}

/// Sequences Collector -> Classifier -> Validator -> report stage
pub struct Pipeline<E: EvidenceSource> {
    collector: Collector,
    model_store: ModelStore,
    validator: Validator<E>,
    top_n: usize,
}

impl<E: EvidenceSource> Pipeline<E> {
    pub fn new(
        collector_config: CollectorConfig,
        model_store: ModelStore,
        evidence: E,
        top_n: usize,
    ) -> Self {
        Self {
            collector: Collector::new(collector_config),
            model_store,
            validator: Validator::new(evidence),
            top_n,
        }
    }

    /// Run the full cross-validation pipeline.
    ///
    /// Collects, classifies, validates the CTI subset, and hands the
    /// evidence blob to the report collaborator. An empty collection
    /// or an empty CTI subset ends the run successfully without a
    /// report.
    pub async fn run(
        &self,
        source: &dyn MessageSource,
        reporter: &dyn ReportGenerator,
    ) -> Result<RunSummary> {
        let outcome = self.collector.collect(source).await?;
        if outcome.messages.is_empty() {
            info!("no messages collected, nothing to classify");
            return Ok(RunSummary {
                collected: 0,
                cti_count: 0,
                validated: Vec::new(),
                report_path: None,
            });
        }

        let texts: Vec<String> = outcome
            .messages
            .iter()
            .map(|m| m.normalized_text.clone())
            .collect();

        let classifier = CtiClassifier::load_or_bootstrap(&self.model_store, &texts)?;
        let labels = classifier.predict(&texts);

        let labeled: Vec<LabeledMessage> = outcome
            .messages
            .into_iter()
            .zip(labels)
            .map(|(message, label)| LabeledMessage { message, label })
            .collect();

        let cti_messages: Vec<String> = labeled
            .iter()
            .filter(|l| l.label == Label::Cti)
            .map(|l| l.message.normalized_text.clone())
            .collect();
        info!(
            collected = labeled.len(),
            cti = cti_messages.len(),
            "classification completed"
        );

        if cti_messages.is_empty() {
            info!("no CTI messages found");
            return Ok(RunSummary {
                collected: labeled.len(),
                cti_count: 0,
                validated: Vec::new(),
                report_path: None,
            });
        }

        let validated = self.validator.validate(&cti_messages, self.top_n).await;

        let bundle = ReportBundle::new(CROSS_VALIDATION_TOPIC, render_evidence_blob(&validated));
        let report_path = reporter.generate(&bundle).await?;
        info!(path = %report_path.display(), "cross-validation report generated");

        Ok(RunSummary {
            collected: labeled.len(),
            cti_count: cti_messages.len(),
            validated,
            report_path: Some(report_path),
        })
    }

    /// Run the direct threat-search pass: one standing query against
    /// the evidence source, rendered straight into a report bundle.
    pub async fn run_threat_search(&self, reporter: &dyn ReportGenerator) -> Result<PathBuf> {
        let hits = self.validator.source().search(THREAT_SEARCH_QUERY).await?;
        let blob = ctistream_validator::render_hits(&hits);

        let bundle = ReportBundle::new(THREAT_SEARCH_TOPIC, blob);
        let path = reporter.generate(&bundle).await?;
        info!(path = %path.display(), "threat-search report generated");
        Ok(path)
    }
}

/// Serialize evidence records into the numbered blob the report stage
/// consumes.
pub fn render_evidence_blob(records: &[EvidenceRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            format!(
                "{}. {} - {}\n{}",
                idx + 1,
                record.confidence_tier,
                record.message,
                record.evidence_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
