use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;
use url::Url;

/// Transport timeouts used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

pub const RPC_URL_ENV: &str = "ZKSYNC_RPC_URL";
pub const NETWORK_ENV: &str = "ZKSYNC_NETWORK";
pub const CALL_TIMEOUT_ENV: &str = "ZKSYNC_CALL_TIMEOUT";
pub const LOG_LEVEL_ENV: &str = "ZKSYNC_LOG_LEVEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("Failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("Failed to parse log level: {0}")]
    LogLevelParseError(String),
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

/// Public zkSync deployments with a known JSON-RPC endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Rinkeby,
    Ropsten,
    Localhost,
}

impl Network {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.zksync.io/jsrpc",
            Self::Rinkeby => "https://rinkeby-api.zksync.io/jsrpc",
            Self::Ropsten => "https://ropsten-api.zksync.io/jsrpc",
            Self::Localhost => "http://127.0.0.1:3030",
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "rinkeby" => Ok(Self::Rinkeby),
            "ropsten" => Ok(Self::Ropsten),
            "localhost" => Ok(Self::Localhost),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub rpc_url: String,
    #[serde(default = "default_timeout")]
    pub call_timeout_seconds: u64,
    #[serde(default = "default_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ClientConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            rpc_url: network.rpc_url().to_string(),
            call_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            connect_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            log_level: default_log_level(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Read `ZKSYNC_RPC_URL` (or the `ZKSYNC_NETWORK` preset), `ZKSYNC_CALL_TIMEOUT`
    /// and `ZKSYNC_LOG_LEVEL` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match (var(RPC_URL_ENV), var(NETWORK_ENV)) {
            (Some(rpc_url), _) => Self {
                rpc_url,
                ..Self::for_network(Network::Localhost)
            },
            (None, Some(network)) => Self::for_network(network.parse()?),
            (None, None) => return Err(ConfigError::MissingEnvVar(RPC_URL_ENV.to_string())),
        };
        if let Some(timeout) = var(CALL_TIMEOUT_ENV) {
            config.call_timeout_seconds = timeout
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar(CALL_TIMEOUT_ENV.to_string(), timeout))?;
        }
        if let Some(log_level) = var(LOG_LEVEL_ENV) {
            config.log_level = log_level;
        }
        Ok(config)
    }

    pub fn rpc_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.rpc_url).map_err(ConfigError::from)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevelParseError(self.log_level.clone()))
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}
