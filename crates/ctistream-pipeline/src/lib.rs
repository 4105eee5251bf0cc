//! ctistream Pipeline
//!
//! Sequences the collection, classification, and validation stages and
//! builds the structured input contract for the external report stage.

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::PipelineConfig;
pub use pipeline::{
    render_evidence_blob, Pipeline, RunSummary, CROSS_VALIDATION_TOPIC, THREAT_SEARCH_QUERY,
    THREAT_SEARCH_TOPIC,
};
pub use report::{
    agent_roster, report_output_path, task_templates, AgentSpec, MarkdownReportWriter,
    ReportBundle, ReportGenerator, TaskSpec, CROSS_VALIDATION_REPORT_PATH, DEFAULT_REPORT_PATH,
};

use clap::Parser;
use std::path::PathBuf;

/// Command-line interface for the ctistream binary
#[derive(Parser, Debug)]
#[command(name = "ctistream")]
#[command(about = "CTI collection, classification, and cross-validation pipeline", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Comma-separated channel list override
    #[arg(long)]
    pub channels: Option<String>,

    /// Message budget override
    #[arg(long)]
    pub message_budget: Option<usize>,

    /// Number of CTI messages to cross-validate
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Directory with per-channel JSONL message dumps
    #[arg(long)]
    pub dumps_dir: Option<PathBuf>,

    /// Skip the direct threat-search pass
    #[arg(long)]
    pub no_threat_search: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
