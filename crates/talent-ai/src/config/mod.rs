use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::screening::scoring::{
    TierPolicy, DEFAULT_EXCELLENT_THRESHOLD, DEFAULT_GOOD_THRESHOLD,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub screening: ScreeningConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            screening: ScreeningConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where candidates and the rulebook come from, and how results are tiered.
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    pub candidates_csv: Option<PathBuf>,
    /// JSON rulebook replacing the bundled one.
    pub engine_config: Option<PathBuf>,
    pub parallel_batch: bool,
    pub tiers: TierPolicy,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            candidates_csv: None,
            engine_config: None,
            parallel_batch: true,
            tiers: TierPolicy::default(),
        }
    }
}

impl ScreeningConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let candidates_csv = optional_path("TALENT_CANDIDATES_CSV");
        let engine_config = optional_path("TALENT_ENGINE_CONFIG");

        let parallel_batch = match env::var("TALENT_PARALLEL_BATCH") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                key: "TALENT_PARALLEL_BATCH",
                value: raw,
            })?,
            Err(_) => true,
        };

        let excellent = threshold("TALENT_TIER_EXCELLENT", DEFAULT_EXCELLENT_THRESHOLD)?;
        let good = threshold("TALENT_TIER_GOOD", DEFAULT_GOOD_THRESHOLD)?;
        if good >= excellent {
            return Err(ConfigError::TierOrder { good, excellent });
        }

        Ok(Self {
            candidates_csv,
            engine_config,
            parallel_batch,
            tiers: TierPolicy::with_thresholds(excellent, good),
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn threshold(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| (0.0..=100.0).contains(value))
        .ok_or(ConfigError::InvalidThreshold { key, value: raw })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { key: &'static str, value: String },
    InvalidThreshold { key: &'static str, value: String },
    TierOrder { good: f64, excellent: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { key, value } => {
                write!(f, "{key} must be true or false, got '{value}'")
            }
            ConfigError::InvalidThreshold { key, value } => {
                write!(f, "{key} must be a number between 0 and 100, got '{value}'")
            }
            ConfigError::TierOrder { good, excellent } => write!(
                f,
                "TALENT_TIER_GOOD ({good}) must be below TALENT_TIER_EXCELLENT ({excellent})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidThreshold { .. }
            | ConfigError::TierOrder { .. } => None,
        }
    }
}
