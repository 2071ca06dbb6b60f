//! Service configuration loaded from `SENDER_*` environment variables.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const PREFIX: &str = "SENDER_";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_STORE_DIR: &str = "./data";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_SEND_THANKS_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required variable {0}")]
    Missing(String),
    /// A variable is set but its value is unusable.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Full variable name.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: format!("{PREFIX}{key}"),
            reason: reason.into(),
        }
    }
}

/// Queue and dedup-set backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackendConfig {
    /// In-memory store; contents are lost on restart.
    InMemory,
    /// JSON-lines files under a directory.
    File {
        /// Directory holding the queue and set files.
        dir: PathBuf,
    },
    /// Redis list and set.
    Redis {
        /// `host:port` or `redis://` URL.
        addr: String,
    },
}

/// Timing of the load and dispatch loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Period of the load loop.
    pub update_interval: Duration,
    /// Dispatch loop sleep when the queue is empty.
    pub poll_interval: Duration,
    /// Upper bound on a single dispatch (pop plus send).
    pub send_thanks_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            send_thanks_timeout: DEFAULT_SEND_THANKS_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Validate loop timings.
    ///
    /// # Errors
    ///
    /// Rejects zero durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval.is_zero() {
            return Err(ConfigError::invalid(
                "SERVER_UPDATE_INTERVAL",
                "must be greater than 0",
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::invalid(
                "SERVER_POLL_INTERVAL",
                "must be greater than 0",
            ));
        }
        if self.send_thanks_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "SERVER_SEND_THANKS_TIMEOUT",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Root configuration of the sender service.
#[derive(Clone)]
pub struct AppConfig {
    /// Login email for the takers API.
    pub email: String,
    /// Login password for the takers API.
    pub password: String,
    /// Base URL of the takers API.
    pub takers_api: String,
    /// `tracing` filter directive.
    pub log_level: String,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// Queue and set backend.
    pub store: StoreBackendConfig,
    /// Loop timings.
    pub server: ServerConfig,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("takers_api", &self.takers_api)
            .field("log_level", &self.log_level)
            .field("http_timeout", &self.http_timeout)
            .field("store", &self.store)
            .field("server", &self.server)
            .finish()
    }
}

impl AppConfig {
    /// Load from the process environment, after reading an optional `.env` file.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case in production.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup and validate.
    ///
    /// # Errors
    ///
    /// Fails when a required variable is missing, a value does not parse, or
    /// validation rejects the result.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(&format!("{PREFIX}{key}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required =
            |key: &str| get(key).ok_or_else(|| ConfigError::Missing(format!("{PREFIX}{key}")));
        let duration = |key: &str, default: Duration| {
            get(key).map_or(Ok(default), |raw| {
                parse_duration(&raw).map_err(|reason| ConfigError::invalid(key, reason))
            })
        };

        let store = match get("STORE").as_deref().unwrap_or("in_memory") {
            "in_memory" | "inmem" | "memory" => StoreBackendConfig::InMemory,
            "file" => StoreBackendConfig::File {
                dir: PathBuf::from(get("STORE_DIR").unwrap_or_else(|| DEFAULT_STORE_DIR.into())),
            },
            "redis" => StoreBackendConfig::Redis {
                addr: required("REDIS_ADDR")?,
            },
            other => {
                return Err(ConfigError::invalid(
                    "STORE",
                    format!("unknown backend `{other}` (expected in_memory, file or redis)"),
                ))
            }
        };

        let config = Self {
            email: required("EMAIL")?,
            password: required("PASSWORD")?,
            takers_api: required("TAKERS_API")?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            http_timeout: duration("HTTP_TIMEOUT", DEFAULT_HTTP_TIMEOUT)?,
            store,
            server: ServerConfig {
                update_interval: duration("SERVER_UPDATE_INTERVAL", DEFAULT_UPDATE_INTERVAL)?,
                poll_interval: duration("SERVER_POLL_INTERVAL", DEFAULT_POLL_INTERVAL)?,
                send_thanks_timeout: duration(
                    "SERVER_SEND_THANKS_TIMEOUT",
                    DEFAULT_SEND_THANKS_TIMEOUT,
                )?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate values that parsing alone does not catch.
    ///
    /// # Errors
    ///
    /// Rejects a base URL without a scheme, a zero HTTP timeout, and invalid
    /// loop timings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.takers_api.starts_with("http://") || self.takers_api.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "TAKERS_API",
                "must be an http:// or https:// URL",
            ));
        }
        if self.http_timeout.is_zero() {
            return Err(ConfigError::invalid("HTTP_TIMEOUT", "must be greater than 0"));
        }
        self.server.validate()
    }
}

/// Parse a duration such as `300ms`, `1.5s` or `1h2m30s`.
///
/// Accepts a sequence of decimal numbers, each with a unit: `ns`, `us` (or
/// `µs`), `ms`, `s`, `m`, `h`. A bare `0` is also accepted.
///
/// # Errors
///
/// Returns a description of the problem for anything else.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw == "0" {
        return Ok(Duration::ZERO);
    }
    if raw.is_empty() {
        return Err("empty duration".into());
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut rest = raw;
    let mut nanos = 0.0_f64;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !is_number(c))
            .ok_or_else(|| format!("`{raw}` is missing a unit (use ns, us, ms, s, m or h)"))?;
        let (number, tail) = rest.split_at(number_end);
        let value: f64 = number
            .parse()
            .map_err(|_| format!("`{raw}` has a malformed number `{number}`"))?;

        let unit_end = tail.find(is_number).unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);
        let scale = match unit {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            other => return Err(format!("unknown unit `{other}` in `{raw}`")),
        };

        nanos += value * scale;
        rest = next;
    }

    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(format!("`{raw}` is out of range"));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}
