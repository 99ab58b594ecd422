use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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
    pub shortlist: ShortlistConfig,
    pub parser: ParserConfig,
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

        let top_n = env::var("APP_SHORTLIST_TOP_N")
            .unwrap_or_else(|_| "5".to_string())
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or(ConfigError::InvalidTopN)?;
        let dei_mode = match env::var("APP_DEI_MODE") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidDeiMode)?,
            Err(_) => true,
        };

        let base_url = env::var("APP_PARSER_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();
        let poll_interval_ms = parse_u64("APP_PARSER_POLL_INTERVAL_MS", 1000)?;
        let max_polls = parse_max_polls("APP_PARSER_MAX_POLLS", 30)?;
        let timeout_secs = parse_u64("APP_PARSER_TIMEOUT_SECS", 60)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            shortlist: ShortlistConfig { top_n, dei_mode },
            parser: ParserConfig {
                base_url,
                poll_interval: Duration::from_millis(poll_interval_ms),
                max_polls,
                request_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

fn parse_max_polls(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    let raw = parse_u64(key, u64::from(default))?;
    u32::try_from(raw)
        .ok()
        .filter(|value| *value > 0)
        .ok_or(ConfigError::InvalidNumber { key })
}

/// Serialises tests that mutate the process environment.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
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

/// Guardrail dials applied when a shortlist is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortlistConfig {
    pub top_n: usize,
    pub dei_mode: bool,
}

/// Location and polling cadence of the external CV parsing service.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    pub max_polls: u32,
    pub request_timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTopN,
    InvalidDeiMode,
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTopN => {
                write!(f, "APP_SHORTLIST_TOP_N must be a positive integer")
            }
            ConfigError::InvalidDeiMode => {
                write!(f, "APP_DEI_MODE must be one of true/false/on/off/1/0")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be an integer within its accepted range")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
