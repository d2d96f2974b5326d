use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::client::{ClientOptions, DEFAULT_BASE_URL, parse_base_url};
use crate::download::EngineOptions;
use crate::download::engine::DEFAULT_USER_AGENT;
use crate::dump::ParseMode;
use crate::dump::trackers::{default_trackers, is_pre_escaped};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub magnet: MagnetConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MagnetConfig {
    /// Percent-encoded announce URLs, copied into `tr` as-is.
    #[serde(default = "default_trackers")]
    pub trackers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsingConfig {
    #[serde(default)]
    pub mode: ParseMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Jsonl,
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "table" => Ok(OutputFormat::Table),
            other => Err(format!(
                "Unknown output format '{}', expected json, jsonl or table",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl Default for MagnetConfig {
    fn default() -> Self {
        Self {
            trackers: default_trackers(),
        }
    }
}

impl Config {
    /// Client settings described by this config.
    pub fn client_options(&self) -> Result<ClientOptions> {
        let options = ClientOptions::new(&self.source.base_url)
            .context("Invalid source.base_url")?
            .with_trackers(self.magnet.trackers.clone())
            .with_parse_mode(self.parsing.mode);
        Ok(options)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            user_agent: self.source.user_agent.clone(),
            timeout: self.source.timeout_secs.map(Duration::from_secs),
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    config_file: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Create a new ConfigManager and load existing config or create default
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "ettv-dump")
            .context("Failed to determine config directory")?;

        Self::with_path(project_dirs.config_dir().join("config.toml"))
    }

    /// Use an explicit config file, creating it with defaults if missing
    pub fn with_path(config_file: PathBuf) -> Result<Self> {
        let config_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        // Create config directory if it doesn't exist
        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
        }

        let config = if config_file.exists() {
            Self::load_config(&config_file)?
        } else {
            let default_config = Config::default();
            Self::save_config(&config_file, &default_config)?;
            default_config
        };

        Ok(Self {
            config_dir,
            config_file,
            config,
        })
    }

    /// Get a reference to the current config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a mutable reference to the current config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Save the current config to disk
    pub fn save(&self) -> Result<()> {
        Self::save_config(&self.config_file, &self.config)
    }

    /// Reload config from disk
    pub fn reload(&mut self) -> Result<()> {
        self.config = Self::load_config(&self.config_file)?;
        Ok(())
    }

    /// Replace the config with defaults and write it out
    pub fn reset(&mut self) -> Result<()> {
        self.config = Config::default();
        self.save()
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the config file path
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Load config from file
    fn load_config(config_file: &Path) -> Result<Config> {
        let content = fs::read_to_string(config_file)
            .with_context(|| format!("Failed to read config file: {:?}", config_file))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_file))?;

        Ok(config)
    }

    /// Save config to file
    fn save_config(config_file: &Path, config: &Config) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(config_file, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_file))?;

        Ok(())
    }

    /// Create a sample config file for user reference
    pub fn create_sample_config(&self) -> Result<PathBuf> {
        let sample_file = self.config_dir.join("config.sample.toml");
        Self::save_config(&sample_file, &Config::default())?;
        Ok(sample_file)
    }

    /// Validate the current configuration
    pub fn validate(&self) -> Result<()> {
        self.validate_source()?;
        self.validate_trackers()
    }

    /// Check the `[source]` section used for downloads
    pub fn validate_source(&self) -> Result<()> {
        let source = &self.config.source;

        let base_url = parse_base_url(&source.base_url)
            .with_context(|| format!("base_url '{}' is not a valid URL", source.base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            anyhow::bail!("base_url must use http or https, got '{}'", base_url.scheme());
        }

        if source.user_agent.trim().is_empty() {
            anyhow::bail!("user_agent cannot be empty");
        }

        if source.timeout_secs == Some(0) {
            anyhow::bail!("timeout_secs must be greater than 0 when set");
        }

        Ok(())
    }

    /// Check that every tracker is already percent-encoded
    pub fn validate_trackers(&self) -> Result<()> {
        for (idx, tracker) in self.config.magnet.trackers.iter().enumerate() {
            if !is_pre_escaped(tracker) {
                anyhow::bail!(
                    "tracker #{} '{}' must be percent-encoded (e.g. udp%3A%2F%2Fhost%3A6969%2Fannounce)",
                    idx + 1,
                    tracker
                );
            }
        }

        Ok(())
    }
}
