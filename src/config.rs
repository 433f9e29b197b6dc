use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::report::types::FlagKind;

/// Config file looked up in the current directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".diff-focus.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .diff-focus.toml.
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP service settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Extra risk heuristics, evaluated after the built-in ones
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Artificial delay before answering an analyze request
    pub response_delay_ms: u64,
    /// Built front-end to serve for paths the API does not handle
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            response_delay_ms: 800,
            static_dir: None,
        }
    }
}

/// One extra risk heuristic. `pattern` is a regex matched against the raw
/// diff text; add `(?i)` for case-insensitive matching.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub name: Option<String>,
    pub pattern: String,
    pub kind: FlagKind,
    pub message: String,
    #[serde(default)]
    pub weight: u32,
}

impl Config {
    /// Load configuration from `path`, or from .diff-focus.toml in the
    /// current directory when no path is given.
    ///
    /// A missing default file yields `Config::default()`; a missing explicit
    /// file is an error. `PORT` in the environment overrides `server.port`.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_port_override(std::env::var("PORT").ok());
        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// An empty or unparsable value keeps the configured port.
    fn apply_port_override(&mut self, port: Option<String>) {
        let Some(raw) = port else {
            return;
        };
        if raw.trim().is_empty() {
            return;
        }
        match raw.trim().parse() {
            Ok(port) => self.server.port = port,
            Err(_) => warn!(value = %raw, port = self.server.port, "ignoring invalid PORT"),
        }
    }
}
