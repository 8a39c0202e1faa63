use crate::error::ConfigError;
use crate::rules::{DatePosition, NumberingMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_DIR: &str = ".batchren";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Preview format: "table", "summary", or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    #[serde(default)]
    pub number_mode: NumberingMode,

    #[serde(default = "default_number_start")]
    pub number_start: u64,

    #[serde(default = "default_number_padding")]
    pub number_padding: usize,

    #[serde(default)]
    pub date_position: DatePosition,

    /// Glob applied to file names when `--pattern` is not given
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            number_mode: NumberingMode::Append,
            number_start: default_number_start(),
            number_padding: default_number_padding(),
            date_position: DatePosition::Prefix,
            pattern: default_pattern(),
            use_color: None,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_number_start() -> u64 {
    1
}

fn default_number_padding() -> usize {
    3
}

fn default_pattern() -> String {
    "*".to_string()
}

impl Config {
    /// Load config from .batchren/config.toml in the current directory if it exists
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidConfigFile {
            path: path.to_path_buf(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config: Self = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
