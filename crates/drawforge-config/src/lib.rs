//! Configuration system for drawforge.
//!
//! Load draw configuration from TOML or YAML files to control the attempt
//! budget, the mutual-pair policy and reproducibility without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use drawforge_config::{DrawConfig, EnvironmentMode};
//!
//! let config = DrawConfig::from_toml_str(r#"
//!     environment_mode = "reproducible"
//!     random_seed = 7
//!     max_attempts = 250
//!     allow_minimal_cycles = true
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
//! assert_eq!(config.max_attempts, 250);
//! assert!(config.allow_minimal_cycles);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use drawforge_config::DrawConfig;
//!
//! let config = DrawConfig::load("draw.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert_eq!(config.max_attempts, 1000);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default randomized attempt budget.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Default search budget for the cycle cover phase.
pub const DEFAULT_SEARCH_NODE_LIMIT: u64 = 1_000_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main draw configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct DrawConfig {
    /// Environment mode affecting reproducibility and assertions.
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible draws.
    pub random_seed: Option<u64>,

    /// Permit two participants to draw each other when nothing else works.
    pub allow_minimal_cycles: bool,

    /// Attempt budget of the randomized phase.
    pub max_attempts: u32,

    /// Search budget of the cycle cover phase.
    pub search_node_limit: u64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            allow_minimal_cycles: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            search_node_limit: DEFAULT_SEARCH_NODE_LIMIT,
        }
    }
}

impl DrawConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, as YAML when the extension is
    /// `.yaml` or `.yml` and as TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, cannot be parsed or fails
    /// [`DrawConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks semantic constraints the parser cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.environment_mode == EnvironmentMode::Reproducible && self.random_seed.is_none() {
            return Err(ConfigError::Invalid(
                "reproducible mode requires random_seed".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the randomized attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets whether mutual pairs are allowed.
    pub fn with_minimal_cycles(mut self, allow: bool) -> Self {
        self.allow_minimal_cycles = allow;
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Returns true if every phase result should be validated, not only the final one.
    pub fn is_full_assert(&self) -> bool {
        self.environment_mode == EnvironmentMode::FullAssert
    }
}

/// Environment mode affecting engine behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeded from the OS unless a seed is given.
    #[default]
    NonReproducible,

    /// Deterministic draws from `random_seed`.
    Reproducible,

    /// Validates every intermediate result.
    FullAssert,
}

#[cfg(test)]
mod tests;
