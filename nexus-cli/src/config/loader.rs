use super::types::{NexusConfig, OutputConfig, RawNexusConfig, RawOutputConfig, StageConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<NexusConfig> {
        Self::load_layers(&[Self::user_config_path(), Self::project_config_path()])
    }

    /// Load and merge the given layers in order; missing files are skipped
    pub fn load_layers(paths: &[PathBuf]) -> Result<NexusConfig> {
        let mut raw = RawNexusConfig::default();

        for path in paths {
            if let Some(layer) = Self::read_layer(path)? {
                raw = Self::merge_raw(raw, layer);
            }
        }

        // Convert to final config with defaults applied
        Ok(Self::finalize(raw))
    }

    fn read_layer(path: &Path) -> Result<Option<RawNexusConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let layer: RawNexusConfig = toml::from_str(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        debug!(path = %path.display(), "loaded config layer");
        Ok(Some(layer))
    }

    /// Get user config path (XDG layout)
    pub fn user_config_path() -> PathBuf {
        nexus_paths::user_config_file()
    }

    /// Get project config path
    /// Can be overridden with NEXUS_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("NEXUS_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join(nexus_paths::CONFIG_FILE_NAME)
        } else {
            PathBuf::from(".nexus").join(nexus_paths::CONFIG_FILE_NAME)
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawNexusConfig, overlay: RawNexusConfig) -> RawNexusConfig {
        RawNexusConfig {
            output: RawOutputConfig {
                format: overlay.output.format.or(base.output.format),
                pretty: overlay.output.pretty.or(base.output.pretty),
            },
            stage: StageConfig {
                question_bank: overlay.stage.question_bank.or(base.stage.question_bank),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawNexusConfig) -> NexusConfig {
        let defaults = OutputConfig::default();
        NexusConfig {
            output: OutputConfig {
                format: raw.output.format.unwrap_or(defaults.format),
                pretty: raw.output.pretty.unwrap_or(defaults.pretty),
            },
            stage: raw.stage,
        }
    }
}
