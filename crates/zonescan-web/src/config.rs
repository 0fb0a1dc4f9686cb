//! Server configuration from the environment

use std::net::SocketAddr;
use std::str::FromStr;

/// Environment variable holding the listen address
pub const BIND_ADDR_VAR: &str = "ZONESCAN_BIND_ADDR";

/// Environment variable holding the upload size limit in bytes
pub const MAX_UPLOAD_VAR: &str = "ZONESCAN_MAX_UPLOAD_BYTES";

/// Environment variable holding the number of concurrent requests
pub const MAX_CONCURRENT_VAR: &str = "ZONESCAN_MAX_CONCURRENT";

/// Web server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
    /// Maximum requests processed at once
    pub max_concurrent: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_upload_bytes: 64 * 1024 * 1024,
            max_concurrent: 16,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup
    ///
    /// Unset variables use the default; unparseable ones log a warning and
    /// use the default too.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: parse_or(&lookup, BIND_ADDR_VAR, defaults.bind_addr),
            max_upload_bytes: parse_or(&lookup, MAX_UPLOAD_VAR, defaults.max_upload_bytes),
            max_concurrent: parse_or(&lookup, MAX_CONCURRENT_VAR, defaults.max_concurrent).max(1),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid {} value {:?}, using {}", key, raw, default);
                default
            }
        },
    }
}
