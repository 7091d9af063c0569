//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `colony.yaml` at the project root.
//! Every field has a default matching steady-state operation, so an absent
//! file or an empty document is a valid configuration.

use std::path::Path;

use colony_types::Role;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level colony configuration, mirroring `colony.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColonyConfig {
    /// Controller settings (population target, targeted role).
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Run settings for the driving loop.
    #[serde(default)]
    pub run: RunConfig,
}

impl ColonyConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Settings for the per-tick decision procedures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControllerConfig {
    /// Target agent headcount the maintainer converges toward.
    #[serde(default = "default_target_population")]
    pub target_population: u32,

    /// Role maintained and dispatched to gather tasks.
    #[serde(default = "default_role")]
    pub role: Role,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            target_population: default_target_population(),
            role: default_role(),
        }
    }
}

const fn default_target_population() -> u32 {
    10
}

const fn default_role() -> Role {
    Role::BasicWorker
}

/// Settings for the loop that drives the controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Number of ticks to run before exiting.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Real-time milliseconds to sleep between ticks (0 = flat out).
    #[serde(default)]
    pub tick_interval_ms: u64,

    /// Seed for the simulated room layout.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Where colony memory is persisted between runs; `None` disables
    /// persistence.
    #[serde(default)]
    pub memory_path: Option<std::path::PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            tick_interval_ms: 0,
            seed: default_seed(),
            memory_path: None,
        }
    }
}

const fn default_max_ticks() -> u64 {
    200
}

const fn default_seed() -> u64 {
    42
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ColonyConfig::parse("{}").unwrap();
        assert_eq!(config.controller.target_population, 10);
        assert_eq!(config.controller.role, Role::BasicWorker);
        assert_eq!(config.run.max_ticks, 200);
        assert_eq!(config.run.memory_path, None);
    }

    #[test]
    fn partial_override() {
        let yaml = "controller:\n  target_population: 25\nrun:\n  seed: 7\n";
        let config = ColonyConfig::parse(yaml).unwrap();
        assert_eq!(config.controller.target_population, 25);
        assert_eq!(config.controller.role, Role::BasicWorker);
        assert_eq!(config.run.seed, 7);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(ColonyConfig::parse("controller: [").is_err());
    }
}
