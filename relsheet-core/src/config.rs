//! Run configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. Command-line flags (applied by the CLI on top of the loaded config)
//! 2. `--config <file>` - explicit YAML file
//! 3. `~/.config/relsheet/config.yaml` - per-user config, if present
//! 4. Built-in defaults
//!
//! ```yaml
//! source:
//!   endpoint: https://rakudo.org/dl/rakudo
//!   timeout_seconds: 10
//! pipeline:
//!   upgrade_insecure_urls: true
//! ```
//!
//! The resolved [`Config`] is passed by value into the source and the
//! pipeline. Nothing in the core reads configuration on its own.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{ReleaseError, Result};

/// Default release manifest endpoint
pub const DEFAULT_ENDPOINT: &str = "https://rakudo.org/dl/rakudo";

/// Default User-Agent sent with the manifest request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; rakudo-releases; +https://github.com/skaji/rakudo-releases)";

/// Default overall fetch deadline
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Shortest deadline we accept
const MIN_TIMEOUT_SECONDS: u64 = 1;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub pipeline: PipelineOptions,
}

/// Where and how the manifest is fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Manifest URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Identifying User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Overall deadline for the whole fetch, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Knobs for the normalize step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Rewrite `http://` download URLs to `https://`
    #[serde(default = "default_true")]
    pub upgrade_insecure_urls: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_true() -> bool {
    true
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            upgrade_insecure_urls: true,
        }
    }
}

impl SourceConfig {
    /// The fetch deadline, clamped to at least one second
    ///
    /// Pure: called on every transport error, so it must not log.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(MIN_TIMEOUT_SECONDS))
    }
}

impl Config {
    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content)
    }

    /// Load configuration from an explicit file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReleaseError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_yaml(&content).map_err(|e| ReleaseError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve configuration for a run
    ///
    /// An explicit path must exist. Without one, the per-user config file
    /// is used when present and the defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match Self::user_config_path() {
            Some(path) if path.is_file() => Self::load_from_path(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Per-user config file location (`<config dir>/relsheet/config.yaml`)
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "relsheet")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }
}
