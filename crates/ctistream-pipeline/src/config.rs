//! Pipeline configuration
//!
//! One immutable configuration value built at startup from the YAML
//! file plus CLI overrides, then passed into constructors. Nothing
//! reads ambient state mid-run.

use chrono::TimeZone;
use ctistream_collector::{CollectorConfig, SnapshotFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the whole pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Collection-stage configuration
    pub collector: CollectorConfig,

    /// Directory holding the per-channel JSONL message dumps
    #[serde(default = "default_dumps_dir")]
    pub dumps_dir: PathBuf,

    /// Directory holding the persisted classifier artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Number of CTI messages to cross-validate
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Base directory for report artifacts
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

impl PipelineConfig {
    /// Load configuration from file and apply CLI overrides.
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        if let Some(channels) = &cli.channels {
            config.collector.channels =
                channels.split(',').map(|c| c.trim().to_string()).collect();
        }
        if let Some(budget) = cli.message_budget {
            config.collector.message_budget = budget;
        }
        if let Some(top_n) = cli.top_n {
            config.top_n = top_n;
        }
        if let Some(dumps) = &cli.dumps_dir {
            config.dumps_dir = dumps.clone();
        }

        Ok(config)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            collector: CollectorConfig {
                channels: vec!["@thehackernews".to_string()],
                date_min: chrono::Utc
                    .with_ymd_and_hms(2025, 8, 15, 0, 0, 0)
                    .single()
                    .expect("constant window start is a valid UTC date"),
                date_max: chrono::Utc
                    .with_ymd_and_hms(2025, 9, 15, 0, 0, 0)
                    .single()
                    .expect("constant window end is a valid UTC date"),
                message_budget: 20_000,
                time_budget_secs: 21_600,
                search: None,
                checkpoint_interval: 1000,
                backoff_secs: 2,
                output_dir: PathBuf::from("output"),
                file_stem: "cti-extraction".to_string(),
                format: SnapshotFormat::default(),
            },
            dumps_dir: default_dumps_dir(),
            model_dir: default_model_dir(),
            top_n: default_top_n(),
            reports_dir: default_reports_dir(),
        }
    }
}

fn default_dumps_dir() -> PathBuf {
    PathBuf::from("dumps")
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("ml")
}

fn default_top_n() -> usize {
    10
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_with_defaults_parses() {
        let yaml = r#"
collector:
  channels: ["@thehackernews", "@vxunderground"]
  date_min: "2025-08-15T00:00:00Z"
  date_max: "2025-09-15T00:00:00Z"
top_n: 5
"#;
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.collector.channels.len(), 2);
        assert_eq!(config.collector.checkpoint_interval, 1000);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.model_dir, PathBuf::from("ml"));
    }

    #[test]
    fn default_window_is_well_formed() {
        let config = PipelineConfig::default();
        assert!(config.collector.date_min < config.collector.date_max);
        assert!(!config.collector.channels.is_empty());
    }
}
