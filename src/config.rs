use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::normalize::{period, NormalizeOptions, ShotErrorPolicy};
use crate::providers::{fotmob, understat, ProviderKind};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Matches fetched at once in batch mode
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("pitchside/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_understat_base_url")]
    pub understat_base_url: String,
    #[serde(default = "default_fotmob_base_url")]
    pub fotmob_base_url: String,
}

fn default_understat_base_url() -> String {
    understat::BASE_URL.to_string()
}

fn default_fotmob_base_url() -> String {
    fotmob::BASE_URL.to_string()
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            understat_base_url: default_understat_base_url(),
            fotmob_base_url: default_fotmob_base_url(),
        }
    }
}

impl ProvidersConfig {
    pub fn base_url(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::Understat => &self.understat_base_url,
            ProviderKind::Fotmob => &self.fotmob_base_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    /// abort: one bad shot fails the match; skip: drop and record it
    #[serde(default)]
    pub shot_error_policy: ShotErrorPolicy,
    /// Nominal half length used when a provider has no period field
    #[serde(default = "default_half_length_minutes")]
    pub half_length_minutes: u32,
}

fn default_half_length_minutes() -> u32 {
    period::DEFAULT_HALF_LENGTH_MINUTES
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            shot_error_policy: ShotErrorPolicy::default(),
            half_length_minutes: default_half_length_minutes(),
        }
    }
}

impl NormalizeConfig {
    pub fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            shot_error_policy: self.shot_error_policy,
            half_length_minutes: self.half_length_minutes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for daily rolling log files; console only when unset
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("normalize.shot_error_policy", "abort")?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("PITCHSIDE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (PITCHSIDE_HTTP__TIMEOUT_SECS, etc.)
            .add_source(
                Environment::with_prefix("PITCHSIDE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.http.timeout_secs == 0 {
            errors.push("http.timeout_secs must be positive".to_string());
        }

        if self.http.max_concurrency == 0 {
            errors.push("http.max_concurrency must be positive".to_string());
        }

        for (name, url) in [
            ("providers.understat_base_url", &self.providers.understat_base_url),
            ("providers.fotmob_base_url", &self.providers.fotmob_base_url),
        ] {
            if url::Url::parse(url).is_err() {
                errors.push(format!("{name} is not a valid URL: `{url}`"));
            }
        }

        if self.normalize.half_length_minutes == 0 {
            errors.push("normalize.half_length_minutes must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
