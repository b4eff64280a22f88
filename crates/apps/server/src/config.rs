use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 3600;
pub const DEFAULT_DATASET_TTL_SECS: u64 = 86400;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PROXY_ADDR {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Server-only secrets for the statistics API.
#[derive(Clone)]
pub struct Credentials {
    pub api_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub addr: SocketAddr,
    /// `None` when `API_URL` or `API_KEY` is unset. The server still starts;
    /// every API request then answers 500.
    pub credentials: Option<Credentials>,
    pub catalog_ttl: Duration,
    pub dataset_ttl: Duration,
    pub upstream_timeout: Option<Duration>,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_raw = var("PROXY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr_raw.clone(),
                source,
            })?;

        let credentials = match (var("API_URL"), var("API_KEY")) {
            (Some(api_url), Some(api_key)) => Some(Credentials {
                api_url: api_url.trim_end_matches('/').to_string(),
                api_key,
            }),
            _ => None,
        };

        let secs = |key: &str| var(key).and_then(|v| v.trim().parse::<u64>().ok());

        Ok(Self {
            addr,
            credentials,
            catalog_ttl: Duration::from_secs(
                secs("PROXY_CATALOG_TTL_SECS").unwrap_or(DEFAULT_CATALOG_TTL_SECS),
            ),
            dataset_ttl: Duration::from_secs(
                secs("PROXY_DATASET_TTL_SECS").unwrap_or(DEFAULT_DATASET_TTL_SECS),
            ),
            upstream_timeout: secs("PROXY_UPSTREAM_TIMEOUT_SECS").map(Duration::from_secs),
        })
    }
}
