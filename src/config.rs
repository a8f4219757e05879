//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use crate::logging::{parse_byte_size, LogConfig, LogFormat};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ADVERTISEMENT_BASE_URL: &str =
    "http://ads.rocket-stream.bottlerocketservices.com";
pub const DEFAULT_IMAGE_BASE_URL: &str = "http://images.rocket-stream.bottlerocketservices.com";
pub const DEFAULT_VIDEO_BASE_URL: &str = "http://videos.rocket-stream.bottlerocketservices.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    // --- Upstream services ---
    /// Rocket Advertisement base URL
    pub advertisement_base_url: String,
    /// Rocket Image base URL
    pub image_base_url: String,
    /// Rocket Video base URL
    pub video_base_url: String,
    /// Total attempts per upstream call (>= 1)
    pub upstream_max_attempts: u32,
    /// Cap on the delay between retries
    pub upstream_max_backoff: Duration,
    /// Per-request timeout
    pub upstream_timeout: Duration,
    /// How long successful responses are reused (zero disables caching)
    pub upstream_cache_ttl: Duration,

    // --- Logging ---
    pub logging: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            advertisement_base_url: DEFAULT_ADVERTISEMENT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            video_base_url: DEFAULT_VIDEO_BASE_URL.to_string(),
            upstream_max_attempts: 10,
            upstream_max_backoff: Duration::from_millis(1_000),
            upstream_timeout: Duration::from_secs(10),
            upstream_cache_ttl: Duration::from_secs(60),
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Config for tests: every upstream points at `base_url`, retries are
    /// fast and caching is off.
    pub fn test_default(base_url: &str) -> Self {
        Self {
            advertisement_base_url: base_url.to_string(),
            image_base_url: base_url.to_string(),
            video_base_url: base_url.to_string(),
            upstream_max_attempts: 3,
            upstream_max_backoff: Duration::from_millis(5),
            upstream_timeout: Duration::from_secs(2),
            upstream_cache_ttl: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let log_defaults = LogConfig::default();

        let upstream_max_attempts =
            parse_var("UPSTREAM_MAX_ATTEMPTS", defaults.upstream_max_attempts)?;
        if upstream_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "UPSTREAM_MAX_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }

        let file_window = parse_var("LOG_FILE_WINDOW", log_defaults.file_window)?;
        if file_window == 0 {
            return Err(ConfigError::Invalid {
                name: "LOG_FILE_WINDOW",
                reason: "must be a positive integer".to_string(),
            });
        }

        let file_base_index = parse_var("LOG_FILE_BASE_INDEX", log_defaults.file_base_index)?;
        if file_base_index.checked_add(file_window - 1).is_none() {
            return Err(ConfigError::Invalid {
                name: "LOG_FILE_BASE_INDEX",
                reason: format!("archive indexes overflow with a window of {}", file_window),
            });
        }

        let file_size_limit = match env::var("LOG_FILE_SIZE_LIMIT") {
            Ok(raw) => parse_byte_size(&raw).map_err(|reason| ConfigError::Invalid {
                name: "LOG_FILE_SIZE_LIMIT",
                reason,
            })?,
            Err(_) => log_defaults.file_size_limit,
        };

        let logging = LogConfig {
            level: env::var("LOG_LEVEL").unwrap_or(log_defaults.level),
            format: parse_var("LOG_FORMAT", log_defaults.format)?,
            directory: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(log_defaults.directory),
            file_name: env::var("LOG_FILE_NAME").unwrap_or(log_defaults.file_name),
            file_size_limit,
            file_window,
            file_base_index,
            filter_file: env::var("LOG_FILTER_FILE").ok().map(PathBuf::from),
            refresh_interval: Duration::from_secs(parse_var(
                "LOG_REFRESH_SECS",
                log_defaults.refresh_interval.as_secs(),
            )?),
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            advertisement_base_url: env::var("ADVERTISEMENT_BASE_URL")
                .unwrap_or(defaults.advertisement_base_url),
            image_base_url: env::var("IMAGE_BASE_URL").unwrap_or(defaults.image_base_url),
            video_base_url: env::var("VIDEO_BASE_URL").unwrap_or(defaults.video_base_url),
            upstream_max_attempts,
            upstream_max_backoff: Duration::from_millis(parse_var(
                "UPSTREAM_MAX_BACKOFF_MS",
                defaults.upstream_max_backoff.as_millis() as u64,
            )?),
            upstream_timeout: Duration::from_secs(parse_var(
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout.as_secs(),
            )?),
            upstream_cache_ttl: Duration::from_secs(parse_var(
                "UPSTREAM_CACHE_TTL_SECS",
                defaults.upstream_cache_ttl.as_secs(),
            )?),
            logging,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that touch process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PORT",
        "UPSTREAM_MAX_ATTEMPTS",
        "UPSTREAM_CACHE_TTL_SECS",
        "LOG_FILE_WINDOW",
        "LOG_FILE_SIZE_LIMIT",
        "LOG_FORMAT",
        "LOG_FILE_BASE_INDEX",
    ];

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_from_env_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.upstream_max_attempts, 10);
        assert_eq!(config.upstream_max_backoff, Duration::from_millis(1_000));
        assert_eq!(config.logging.file_window, 20);
        assert_eq!(config.logging.file_base_index, 0);
        assert_eq!(config.logging.file_size_limit, 10 * 1024 * 1024);
        assert_eq!(config.logging.refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_config_from_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();
        env::set_var("PORT", "9090");
        env::set_var("UPSTREAM_CACHE_TTL_SECS", "0");
        env::set_var("LOG_FILE_SIZE_LIMIT", "512kb");
        env::set_var("LOG_FORMAT", "json");

        let config = Config::from_env().expect("Config should load");
        clear_vars();

        assert_eq!(config.port, 9090);
        assert!(config.upstream_cache_ttl.is_zero());
        assert_eq!(config.logging.file_size_limit, 512 * 1024);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        let _guard = ENV_LOCK.lock().unwrap();

        clear_vars();
        env::set_var("LOG_FILE_WINDOW", "0");
        assert!(Config::from_env().is_err());

        clear_vars();
        env::set_var("LOG_FILE_SIZE_LIMIT", "ten megabytes");
        assert!(Config::from_env().is_err());

        clear_vars();
        env::set_var("UPSTREAM_MAX_ATTEMPTS", "0");
        assert!(Config::from_env().is_err());

        clear_vars();
        env::set_var("PORT", "eighty");
        assert!(Config::from_env().is_err());

        clear_vars();
        env::set_var("LOG_FILE_BASE_INDEX", u32::MAX.to_string());
        assert!(Config::from_env().is_err());

        clear_vars();
        env::set_var("LOG_FILE_BASE_INDEX", (u32::MAX - 19).to_string());
        assert!(Config::from_env().is_ok());

        clear_vars();
    }
}
