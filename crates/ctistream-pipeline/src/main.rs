//! ctistream
//!
//! End-to-end CTI pipeline: collect messages from a streaming source,
//! classify them, cross-validate the CTI subset against an external
//! search corpus, and hand the evidence set to the report stage.

use anyhow::Result;
use clap::Parser;
use ctistream_classifier::ModelStore;
use ctistream_collector::JsonlFileSource;
use ctistream_pipeline::{Cli, MarkdownReportWriter, Pipeline, PipelineConfig};
use ctistream_validator::ExaSearchClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    info!("starting ctistream pipeline");

    let config = PipelineConfig::load(&cli.config, &cli)?;
    info!(
        channels = config.collector.channels.len(),
        budget = config.collector.message_budget,
        top_n = config.top_n,
        "configuration loaded"
    );

    // Credentials are checked before any collection I/O.
    let evidence = ExaSearchClient::from_env()?;

    let source = JsonlFileSource::new(&config.dumps_dir);
    let reporter = MarkdownReportWriter::new(&config.reports_dir);
    let pipeline = Pipeline::new(
        config.collector.clone(),
        ModelStore::new(&config.model_dir),
        evidence,
        config.top_n,
    );

    let summary = pipeline.run(&source, &reporter).await?;
    info!(
        collected = summary.collected,
        cti = summary.cti_count,
        validated = summary.validated.len(),
        "cross-validation pipeline finished"
    );
    match &summary.report_path {
        Some(path) => info!(path = %path.display(), "report written"),
        None => info!("no CTI messages found, no report generated"),
    }

    if !cli.no_threat_search {
        let path = pipeline.run_threat_search(&reporter).await?;
        info!(path = %path.display(), "threat-search report written");
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("ctistream=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ctistream=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
