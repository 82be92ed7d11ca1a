//! Consumer configuration.
//!
//! Read from the environment:
//!
//! | variable                | default                   |
//! |-------------------------|---------------------------|
//! | `EVENTRELAY_TRANSPORT`  | `stdin` (`stdin`, `redis`)|
//! | `EVENTRELAY_QUEUE`      | `user-queue`              |
//! | `EVENTRELAY_REDIS_URL`  | `redis://127.0.0.1:6379`  |

use thiserror::Error;

pub const DEFAULT_QUEUE: &str = "user-queue";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

pub const TRANSPORT_VAR: &str = "EVENTRELAY_TRANSPORT";
pub const QUEUE_VAR: &str = "EVENTRELAY_QUEUE";
pub const REDIS_URL_VAR: &str = "EVENTRELAY_REDIS_URL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown transport {0:?} (expected \"stdin\" or \"redis\")")]
    UnknownTransport(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// The transport exists but this build was compiled without it.
    #[error("transport {0:?} is not available in this build")]
    TransportUnavailable(&'static str),
}

/// Where deliveries come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transport {
    /// One envelope per line on standard input.
    Stdin,
    /// Redis pub/sub channel named after the queue.
    Redis,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Stdin => "stdin",
            Transport::Redis => "redis",
        }
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "stdin" => Ok(Transport::Stdin),
            "redis" => Ok(Transport::Redis),
            _ => Err(ConfigError::UnknownTransport(raw.to_string())),
        }
    }
}

impl core::fmt::Display for Transport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerConfig {
    pub transport: Transport,
    pub queue: String,
    pub redis_url: String,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Stdin,
            queue: DEFAULT_QUEUE.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}

impl ConsumerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let transport = match lookup(TRANSPORT_VAR) {
            Some(raw) => Transport::parse(&raw)?,
            None => defaults.transport,
        };

        let queue = lookup(QUEUE_VAR).unwrap_or(defaults.queue);
        if queue.trim().is_empty() {
            return Err(ConfigError::Empty(QUEUE_VAR));
        }

        let redis_url = lookup(REDIS_URL_VAR).unwrap_or(defaults.redis_url);
        if transport == Transport::Redis && redis_url.trim().is_empty() {
            return Err(ConfigError::Empty(REDIS_URL_VAR));
        }

        if transport == Transport::Redis && !cfg!(feature = "redis") {
            return Err(ConfigError::TransportUnavailable("redis"));
        }

        Ok(Self {
            transport,
            queue,
            redis_url,
        })
    }
}
