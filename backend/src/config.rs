//! Application configuration.
//!
//! Defaults are embedded below. `config/local.toml` (optional) and
//! environment variables prefixed `SLEEP_LOG__` override them, e.g.
//! `SLEEP_LOG__SERVER__PORT=9000`.

use std::net::SocketAddr;

use serde::Deserialize;
use shared::PatternChartConfig;
use thiserror::Error;

const DEFAULTS: &str = r#"
    [server]
    host = "127.0.0.1"
    port = 3000

    [logging]
    level = "info"

    [chart]
    window_days = 5
"#;

#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin allowed to call the API from a browser; any origin when unset
    #[serde(default)]
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// Number of days shown side by side in the pattern chart
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_window_days() -> u32 {
    PatternChartConfig::default().window_days
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

impl From<&ChartConfig> for PatternChartConfig {
    fn from(chart: &ChartConfig) -> Self {
        PatternChartConfig {
            window_days: chart.window_days,
        }
    }
}

impl AppConfig {
    /// Load configuration from embedded defaults, an optional local file and
    /// the environment (later sources override earlier).
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SLEEP_LOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration from defaults plus explicit overrides, without
    /// touching files or the environment.
    pub fn load_with_overrides(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.chart.window_days == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "chart.window_days must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port).parse()?;
        Ok(addr)
    }
}
