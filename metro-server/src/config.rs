//! Server configuration from the environment.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "METRO_BIND_ADDR";

/// Environment variable holding the network file path.
pub const NETWORK_FILE_VAR: &str = "METRO_NETWORK_FILE";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

/// The bundled network, located independently of the working directory.
const DEFAULT_NETWORK_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/hyderabad.json");

/// Errors in server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid socket address: {source}")]
    InvalidAddress {
        var: &'static str,
        value: String,
        source: AddrParseError,
    },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// JSON file describing the network's lines
    pub network_file: PathBuf,
}

impl ServerConfig {
    /// Create a config with explicit values.
    pub fn new(bind_addr: SocketAddr, network_file: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            network_file: network_file.into(),
        }
    }

    /// Read the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the config through `lookup`, falling back to defaults for
    /// variables that are unset or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidAddress {
                var: BIND_ADDR_VAR,
                value: addr.clone(),
                source,
            })?;

        let network_file = get(NETWORK_FILE_VAR).unwrap_or_else(|| DEFAULT_NETWORK_FILE.to_string());

        Ok(Self::new(bind_addr, network_file))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(
            SocketAddr::from(([127, 0, 0, 1], 3001)),
            DEFAULT_NETWORK_FILE,
        )
    }
}
