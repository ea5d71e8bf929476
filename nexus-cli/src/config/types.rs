use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawNexusConfig {
    #[serde(default)]
    pub output: RawOutputConfig,

    #[serde(default)]
    pub stage: StageConfig,
}

/// Output config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawOutputConfig {
    /// Output format for results
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    pub pretty: Option<bool>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NexusConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub stage: StageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format for results
    pub format: OutputFormat,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StageConfig {
    /// Question bank used when `--questions` is omitted
    pub question_bank: Option<PathBuf>,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}
