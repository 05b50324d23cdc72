//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::planner::SearchConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATA_PATH: &str = "data/teras.json";

/// An environment variable held a value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Configuration for the tera server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Dataset file loaded at startup and on refresh
    pub data_path: PathBuf,
    /// Rebuild the graph on this interval; off when `None`
    pub refresh_interval: Option<Duration>,
    pub search: SearchConfig,
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            refresh_interval: None,
            search: SearchConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Unset and blank variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = CacheConfig::default();

        let bind_addr = parse_var(
            "TERA_BIND_ADDR",
            get("TERA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;
        let data_path = get("TERA_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let refresh_interval = match get("TERA_REFRESH_SECS") {
            Some(raw) => match parse_var::<u64>("TERA_REFRESH_SECS", raw)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => None,
        };

        let search = match get("TERA_MAX_STOP_PATHS") {
            Some(raw) => {
                let max = parse_var::<usize>("TERA_MAX_STOP_PATHS", raw.clone())?;
                if max == 0 {
                    return Err(ConfigError {
                        var: "TERA_MAX_STOP_PATHS",
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    });
                }
                SearchConfig::new(max)
            }
            None => SearchConfig::default(),
        };

        let ttl = match get("TERA_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(parse_var("TERA_CACHE_TTL_SECS", raw)?),
            None => defaults.ttl,
        };
        let max_capacity = match get("TERA_CACHE_CAPACITY") {
            Some(raw) => parse_var("TERA_CACHE_CAPACITY", raw)?,
            None => defaults.max_capacity,
        };

        Ok(Self {
            bind_addr,
            data_path,
            refresh_interval,
            search,
            cache: CacheConfig { ttl, max_capacity },
        })
    }
}

fn parse_var<T>(var: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        reason: e.to_string(),
        value: raw,
    })
}
