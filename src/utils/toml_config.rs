//! TOML-based configuration for the research editor
//!
//! This module provides declarative configuration for the agent service
//! connection, polling cadence, fan-out behavior and logging via a TOML file
//! (`editor.toml`). Every field has a default, so an empty file is valid.

use crate::editor::EditorOptions;
use crate::langgraph::{AssistantSelector, PollConfig};
use crate::types::{AppError, DEFAULT_MAX_SECTIONS, RESEARCH_REPORT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure loaded from editor.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub research: ResearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============= Service Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Base URL of the agent-run service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable containing the API key, sent as `x-api-key`
    pub api_key_env: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Bind runs to this assistant instead of searching for one
    pub assistant_id: Option<String>,

    /// Restrict the assistant search to this graph
    pub graph_id: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8123".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: None,
            request_timeout_secs: default_request_timeout(),
            assistant_id: None,
            graph_id: None,
        }
    }
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn assistant_selector(&self) -> AssistantSelector {
        AssistantSelector {
            assistant_id: self.assistant_id.clone(),
            graph_id: self.graph_id.clone(),
        }
    }
}

// ============= Polling Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_max_wait_secs() -> u64 {
    600
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

impl PollingConfig {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.interval_ms),
            max_wait: Duration::from_secs(self.max_wait_secs),
        }
    }
}

// ============= Research Configuration =============

/// How the fan-out treats a failing section.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FanOutPolicy {
    /// Fail the whole batch on the first failing section
    #[default]
    FailFast,
    /// Await every section and report each outcome
    Settled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchConfig {
    #[serde(default = "default_report_type")]
    pub report_type: String,

    /// Section bound used when the caller does not give one
    #[serde(default = "default_max_sections")]
    pub default_max_sections: usize,

    /// Cap on concurrent section requests (unbounded when unset)
    pub max_concurrency: Option<usize>,

    #[serde(default)]
    pub fan_out: FanOutPolicy,
}

fn default_report_type() -> String {
    RESEARCH_REPORT.to_string()
}

fn default_max_sections() -> usize {
    DEFAULT_MAX_SECTIONS
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            report_type: default_report_type(),
            default_max_sections: default_max_sections(),
            max_concurrency: None,
            fan_out: FanOutPolicy::default(),
        }
    }
}

impl ResearchConfig {
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            report_type: self.report_type.clone(),
            max_concurrency: self.max_concurrency,
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl EditorConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse configuration from TOML text without validating it
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.service.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "service.base_url must be an http(s) URL, got '{}'",
                url
            )));
        }

        if self.service.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "service.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.polling.interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "polling.interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.polling.interval_ms > self.polling.max_wait_secs.saturating_mul(1000) {
            return Err(ConfigError::ValidationError(format!(
                "polling.interval_ms ({}) exceeds polling.max_wait_secs ({})",
                self.polling.interval_ms, self.polling.max_wait_secs
            )));
        }

        if self.research.max_concurrency == Some(0) {
            return Err(ConfigError::ValidationError(
                "research.max_concurrency must be greater than 0".to_string(),
            ));
        }

        if self.research.default_max_sections == 0 {
            return Err(ConfigError::ValidationError(
                "research.default_max_sections must be greater than 0".to_string(),
            ));
        }

        if let Some(ref env) = self.service.api_key_env {
            self.validate_env_var(env)?;
        }

        Ok(())
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Result<Option<String>, ConfigError> {
        match &self.service.api_key_env {
            Some(env) => std::env::var(env)
                .map(Some)
                .map_err(|_| ConfigError::MissingEnvVar(env.clone())),
            None => Ok(None),
        }
    }
}
