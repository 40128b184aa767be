use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "https://localhost:9200";
pub const DEFAULT_INDEX: &str = "words";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Connection settings for the OpenSearch cluster.
#[derive(Debug, Clone)]
pub struct OpenSearchConfig {
    pub host: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

/// How often index creation is attempted before startup is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub opensearch: OpenSearchConfig,
    pub index: String,
    pub bind_addr: SocketAddr,
    pub provisioning: RetryPolicy,
    pub log_level: tracing::Level,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("OPENSEARCH_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .trim_end_matches('/')
            .to_string();
        let username = get("OPENSEARCH_USERNAME").or_else(|| get("UNAME"));
        let password = get("OPENSEARCH_PASSWORD").or_else(|| get("PWORD"));

        let accept_invalid_certs = match get("OPENSEARCH_ACCEPT_INVALID_CERTS") {
            Some(raw) => parse_bool("OPENSEARCH_ACCEPT_INVALID_CERTS", &raw)?,
            None => true,
        };
        let timeout_secs = parse_or("OPENSEARCH_TIMEOUT_SECS", get, DEFAULT_TIMEOUT_SECS)?;

        let index = get("INDEX").unwrap_or_else(|| DEFAULT_INDEX.to_string());
        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                key: "BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            }
        })?;

        let max_attempts = parse_or("PROVISION_MAX_ATTEMPTS", get, DEFAULT_MAX_ATTEMPTS)?;
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "PROVISION_MAX_ATTEMPTS",
                value: "0".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }
        let delay_secs = parse_or("PROVISION_RETRY_DELAY_SECS", get, DEFAULT_RETRY_DELAY_SECS)?;

        let log_level: tracing::Level = match get("LOG_LEVEL") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "LOG_LEVEL",
                value: raw.clone(),
                reason: "expected one of trace, debug, info, warn, error".to_string(),
            })?,
            None => tracing::Level::INFO,
        };

        Ok(Self {
            opensearch: OpenSearchConfig {
                host,
                username,
                password,
                accept_invalid_certs,
                timeout: Duration::from_secs(timeout_secs),
            },
            index,
            bind_addr,
            provisioning: RetryPolicy {
                max_attempts,
                delay: Duration::from_secs(delay_secs),
            },
            log_level,
        })
    }
}

fn parse_or<T, G>(key: &'static str, get: G, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
