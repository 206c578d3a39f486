use std::path::PathBuf;

use anyhow::{Context, Result};
use eventmatch_core::config::RulesConfig;
use eventmatch_core::{AlignmentPolicy, Config};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::OutputFormat;

/// CLI configuration loaded from TOML file.
///
/// Every field is optional; unset fields fall back to the environment
/// config (`EVENTMATCH_*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Default alignment policy (reject, truncate)
    #[serde(default)]
    pub alignment: Option<AlignmentPolicy>,

    /// Rule-based detection defaults
    #[serde(default)]
    pub rules: RulesSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesSection {
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    pub persistence_length: Option<usize>,
    pub interpolation_limit: Option<usize>,
}

impl CliConfig {
    /// Return the default config file path: ~/.config/eventmatch/config.toml
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("eventmatch");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    ///
    /// A missing default file yields defaults; a missing explicit path is an error.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (PathBuf::from(p), true),
            None => match Self::default_config_path() {
                Ok(p) => (p, false),
                Err(_) => return Ok(Self::default()),
            },
        };

        if !config_path.exists() && !explicit {
            debug!(?config_path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!(?config_path, "Loading config");
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config: {}", config_path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
        Ok(config)
    }

    /// Resolve the output format.
    /// Priority: cli_override > config file > text.
    pub fn resolve_format(&self, cli_override: Option<OutputFormat>) -> OutputFormat {
        cli_override.or(self.format).unwrap_or_default()
    }

    /// Resolve the alignment policy.
    /// Priority: cli_override > config file > environment.
    pub fn resolve_alignment(
        &self,
        cli_override: Option<AlignmentPolicy>,
        env: &Config,
    ) -> AlignmentPolicy {
        cli_override.or(self.alignment).unwrap_or(env.eval.alignment)
    }

    /// Overlay config file rule settings on the environment's.
    pub fn resolve_rules(&self, env: &Config) -> RulesConfig {
        let base = &env.rules;
        RulesConfig {
            range_min: self.rules.range_min.or(base.range_min),
            range_max: self.rules.range_max.or(base.range_max),
            persistence_length: self.rules.persistence_length.or(base.persistence_length),
            interpolation_limit: self
                .rules
                .interpolation_limit
                .unwrap_or(base.interpolation_limit),
        }
    }
}
