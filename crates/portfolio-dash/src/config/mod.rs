mod logging;

pub use logging::{LogLevel, LoggingConfig};

use portfolio_types::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

pub const DEFAULT_REFRESH_SECS: u64 = 30;

pub const DEFAULT_TITLE: &str = "K8s-Terraform Portfolio Demo";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub api_url: String,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: Option<u64>,
    /// Drop task responses overtaken by a newer filter selection.
    pub discard_stale_tasks: bool,
    pub output: Option<PathBuf>,
    pub title: String,
    pub logging: LoggingConfig,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            request_timeout_secs: None,
            discard_stale_tasks: true,
            output: None,
            title: DEFAULT_TITLE.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DashConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("portfolio-dash")
            .join("config.toml")
    }

    pub fn load(path: impl AsRef<Path>) -> PortfolioResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| PortfolioError::Config(format!("Failed to read config: {}", e)))?;

            toml::from_str(&contents)
                .map_err(|e| PortfolioError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> PortfolioResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| PortfolioError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PortfolioError::Config(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| PortfolioError::Config(format!("Failed to write config: {}", e)))?;

        info!("Configuration saved to {:?}", path.as_ref());
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `PORTFOLIO_*` overrides read through `lookup`. Unparseable
    /// numeric or level values are logged and leave the current value.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PORTFOLIO_API_URL") {
            self.api_url = url;
        }

        if let Some(secs) = lookup("PORTFOLIO_REFRESH_SECS") {
            match secs.parse() {
                Ok(s) => self.refresh_interval_secs = s,
                Err(_) => warn!("Ignoring invalid PORTFOLIO_REFRESH_SECS: {}", secs),
            }
        }

        if let Some(output) = lookup("PORTFOLIO_OUTPUT") {
            self.output = Some(PathBuf::from(output));
        }

        if let Some(level) = lookup("PORTFOLIO_LOG_LEVEL") {
            match LogLevel::parse(&level) {
                Some(parsed) => self.logging.level = parsed,
                None => warn!("Ignoring invalid PORTFOLIO_LOG_LEVEL: {}", level),
            }
        }

        if lookup("PORTFOLIO_LOG_JSON").is_some() {
            self.logging.json = true;
        }
    }

    pub fn validate(&self) -> PortfolioResult<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(PortfolioError::Config(format!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            )));
        }

        if self.refresh_interval_secs == 0 {
            return Err(PortfolioError::Config(
                "Refresh interval must be at least 1 second".into(),
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(PortfolioError::Config(
                "Request timeout must be at least 1 second".into(),
            ));
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
