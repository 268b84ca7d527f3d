use config::{Config as ConfigLoader, ConfigError, Environment, File};
use docgenius_client::{ApiError, ClientConfig, PollConfig, BASE_URL_ENV};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: None,
            poll_interval_secs: default_poll_interval_secs(),
            poll_max_attempts: default_poll_max_attempts(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_poll_max_attempts() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. DOCGENIUS_-prefixed variables, `__` between section and key
    ///    (e.g. DOCGENIUS_LOGGING__LEVEL)
    /// 4. DOCGENIUS_API_BASE_URL for the backend origin
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("DOCGENIUS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            cfg.api.base_url = Some(base_url);
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    /// Resolve the client configuration; `base_url_override` wins over every layer
    pub fn client_config(&self, base_url_override: Option<&str>) -> Result<ClientConfig, ApiError> {
        let base_url = base_url_override
            .or(self.api.base_url.as_deref())
            .ok_or_else(|| {
                ApiError::Config(format!(
                    "backend base URL is not configured; set {}, [api] base_url, or pass --base-url",
                    BASE_URL_ENV
                ))
            })?;

        let mut client_config = ClientConfig::new(base_url)?.with_poll(PollConfig {
            interval: Duration::from_secs(self.api.poll_interval_secs),
            max_attempts: self.api.poll_max_attempts,
        });

        if let Some(secs) = self.api.timeout_secs {
            client_config = client_config.with_timeout(Duration::from_secs(secs));
        }

        Ok(client_config)
    }
}
