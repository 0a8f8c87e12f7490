use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `CAR_COST__ADVISOR__API_KEY`
pub const ENV_PREFIX: &str = "CAR_COST";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub advisor: AdvisorConfig,
    #[serde(default)]
    pub snapshots: SnapshotsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// Remote chat-completion service used for the advisory endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdvisorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_advisor_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_advisor_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Language requested for free-text fields of the reply
    #[serde(default = "default_response_language")]
    pub response_language: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_advisor_base_url(),
            api_key: String::new(),
            model: default_advisor_model(),
            timeout_seconds: default_timeout_seconds(),
            response_language: default_response_language(),
        }
    }
}

impl AdvisorConfig {
    /// Enabled and holding credentials
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotsConfig {
    /// JSON file holding saved snapshots
    #[serde(default = "default_snapshots_path")]
    pub path: PathBuf,
}

impl Default for SnapshotsConfig {
    fn default() -> Self {
        Self {
            path: default_snapshots_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

fn default_advisor_base_url() -> String {
    "https://api.z.ai/api/coding/paas/v4".to_string()
}

fn default_advisor_model() -> String {
    "glm-4.6".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_response_language() -> String {
    "English".to_string()
}

fn default_snapshots_path() -> PathBuf {
    PathBuf::from("snapshots.json")
}

/// Load configuration from an optional TOML file, overridden by
/// `CAR_COST__*` environment variables
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be non-zero");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}': expected 'text' or 'json'", other),
    }

    if cfg.advisor.enabled {
        if cfg.advisor.base_url.trim().is_empty() {
            anyhow::bail!("Advisor base_url cannot be empty when the advisor is enabled");
        }
        if cfg.advisor.model.trim().is_empty() {
            anyhow::bail!("Advisor model cannot be empty when the advisor is enabled");
        }
        if cfg.advisor.timeout_seconds == 0 {
            anyhow::bail!("Advisor timeout_seconds must be greater than zero");
        }
    }

    Ok(())
}
