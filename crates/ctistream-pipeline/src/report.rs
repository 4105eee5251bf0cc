//! Report-stage contract
//!
//! The multi-stage report generation itself is an external
//! collaborator: it receives a structured bundle and produces a
//! persisted report artifact. This module defines that contract plus
//! the fixed agent/task templates the collaborator consumes, expressed
//! as explicit named-field structs rather than open key-value maps.

use async_trait::async_trait;
use ctistream_core::Result;
use std::path::{Path, PathBuf};

/// Default report artifact location
pub const DEFAULT_REPORT_PATH: &str = "reports/cybersecurity_report.md";

/// Alternate location for cross-validation runs
pub const CROSS_VALIDATION_REPORT_PATH: &str = "reports/cybersecurity_report_crossvalidate.md";

/// Structured input handed to the report collaborator.
///
/// `threat_summary`, `cve_analysis`, and `mitigation_strategies` are
/// populated by the collaborator's own intermediate stages; upstream
/// they start empty.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub topic: String,
    pub evidence_blob: String,
    pub threat_summary: String,
    pub cve_analysis: String,
    pub mitigation_strategies: String,
}

impl ReportBundle {
    /// Bundle with the analysis fields left for downstream stages.
    pub fn new(topic: impl Into<String>, evidence_blob: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            evidence_blob: evidence_blob.into(),
            threat_summary: String::new(),
            cve_analysis: String::new(),
            mitigation_strategies: String::new(),
        }
    }
}

/// Where the report artifact for `topic` belongs.
///
/// Topics mentioning cross-validation or the streaming source route to
/// the alternate path.
pub fn report_output_path(topic: &str) -> &'static Path {
    let topic = topic.to_lowercase();
    if topic.contains("cross") || topic.contains("telegram") || topic.contains("stream") {
        Path::new(CROSS_VALIDATION_REPORT_PATH)
    } else {
        Path::new(DEFAULT_REPORT_PATH)
    }
}

/// Parameterized behavior template for one report-stage agent
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

/// Parameterized behavior template for one report-stage task
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub expected_output: &'static str,
}

/// Fixed agent roster consumed by the report collaborator.
pub fn agent_roster() -> Vec<AgentSpec> {
    vec![
        AgentSpec {
            role: "Cyber Threat Analyst",
            goal: "Summarize the latest cybersecurity threats.",
            backstory: "Expert analyst tracking global cybersecurity threats and malware campaigns.",
        },
        AgentSpec {
            role: "Vulnerability Researcher",
            goal: "Analyze new CVEs relevant to recent cybersecurity threats and summarize their impact.",
            backstory: "Expert in vulnerability analysis, CVE tracking, and impact assessment.",
        },
        AgentSpec {
            role: "Incident Response Advisor",
            goal: "Provide actionable mitigation strategies for identified cybersecurity threats.",
            backstory: "Experienced incident response leader with expertise in proactive and reactive strategies.",
        },
        AgentSpec {
            role: "Cybersecurity Report Writer",
            goal: "Write a clear, structured cybersecurity intelligence report based on previous findings.",
            backstory: "Technical writer specialized in summarizing cybersecurity research and threat intelligence.",
        },
    ]
}

/// Fixed task sequence consumed by the report collaborator.
pub fn task_templates() -> Vec<TaskSpec> {
    vec![
        TaskSpec {
            name: "threat_analysis",
            description: "Summarize the cybersecurity threats discussed in the evidence results for the topic.",
            expected_output: "A concise summary of the most important cybersecurity threats with sources and dates.",
        },
        TaskSpec {
            name: "vulnerability_analysis",
            description: "Based on the identified threats, analyze the latest relevant CVEs and known exploits.",
            expected_output: "An analysis of recent CVEs related to identified threats and their impact.",
        },
        TaskSpec {
            name: "incident_response",
            description: "Given the identified threats and CVE analysis, suggest actionable mitigation strategies.",
            expected_output: "A list of recommended mitigation strategies and incident response guidance.",
        },
        TaskSpec {
            name: "report_generation",
            description: "Write a structured cybersecurity intelligence report suitable for executives and security teams.",
            expected_output: "A structured cybersecurity report focused on the most probable threats.",
        },
    ]
}

/// Opaque report-generation collaborator.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Produce a persisted report artifact and return its path.
    async fn generate(&self, bundle: &ReportBundle) -> Result<PathBuf>;
}

/// Offline stand-in for the report collaborator: writes the bundle as
/// a markdown document at the topic-derived path under a base
/// directory.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReportWriter {
    base_dir: PathBuf,
}

impl MarkdownReportWriter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl ReportGenerator for MarkdownReportWriter {
    async fn generate(&self, bundle: &ReportBundle) -> Result<PathBuf> {
        let path = self.base_dir.join(report_output_path(&bundle.topic));
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let document = format!(
            "# {}\n\n## Evidence\n\n{}\n\n## Threat Summary\n\n{}\n\n## CVE Analysis\n\n{}\n\n## Mitigation Strategies\n\n{}\n",
            bundle.topic,
            bundle.evidence_blob,
            bundle.threat_summary,
            bundle.cve_analysis,
            bundle.mitigation_strategies
        );
        tokio::fs::write(&path, document).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_validation_topics_use_alternate_path() {
        assert_eq!(
            report_output_path("Telegram Cross-Validation: Weekly Top 10"),
            Path::new(CROSS_VALIDATION_REPORT_PATH)
        );
        assert_eq!(
            report_output_path("streaming source review"),
            Path::new(CROSS_VALIDATION_REPORT_PATH)
        );
        assert_eq!(
            report_output_path("Latest cybersecurity threats September 2025"),
            Path::new(DEFAULT_REPORT_PATH)
        );
    }

    #[test]
    fn templates_are_fixed_and_complete() {
        assert_eq!(agent_roster().len(), 4);
        assert_eq!(task_templates().len(), 4);
        assert_eq!(task_templates()[0].name, "threat_analysis");
    }

    #[tokio::test]
    async fn markdown_writer_persists_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownReportWriter::new(dir.path());
        let bundle = ReportBundle::new("Cross-validation run", "1. Known Threat - sample");

        let path = writer.generate(&bundle).await.unwrap();
        assert!(path.ends_with(CROSS_VALIDATION_REPORT_PATH));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("# Cross-validation run"));
        assert!(content.contains("1. Known Threat - sample"));
    }
}
