use std::{fmt, net::SocketAddr, time::Duration};

use thiserror::Error;

use crate::infrastructure::firebase_identity_provider::DEFAULT_IDENTITY_ENDPOINT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub identity: IdentityConfig,
    pub profile_backend: ProfileBackend,
    pub request_timeout: Duration,
    pub logging: LoggingConfig,
}

#[derive(Clone)]
pub struct IdentityConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileBackend {
    /// user-accounts service reachable over HTTP
    Http { base_url: String },
    /// direct insert through sea-orm
    Database { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Console,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl AppConfig {
    /// Read settings from the process environment (and `.env` if loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let identity = IdentityConfig {
            endpoint: get("IDENTITY_ENDPOINT").unwrap_or_else(|| DEFAULT_IDENTITY_ENDPOINT.to_string()),
            api_key: require("IDENTITY_API_KEY")?,
        };

        let profile_backend = match get("PROFILE_BACKEND").as_deref() {
            None | Some("http") => ProfileBackend::Http {
                base_url: require("PROFILE_SERVICE_URL")?,
            },
            Some("database") => ProfileBackend::Database {
                url: require("DATABASE_URL")?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "PROFILE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "REQUEST_TIMEOUT_SECS",
                        value,
                    });
                }
            },
        };

        let level = get("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                key: "LOG_LEVEL",
                value: level,
            });
        }
        let format = match get("LOG_FORMAT").as_deref() {
            None | Some("console") => LogFormat::Console,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            bind_addr,
            identity,
            profile_backend,
            request_timeout,
            logging: LoggingConfig { level, format },
        })
    }
}
