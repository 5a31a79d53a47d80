//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::collections::HashMap;
use std::env;

use crate::cache::CacheConfig;
use crate::error::Result;

/// Environment variables feeding the driver options, by option name.
const CACHE_VARS: [(&str, &str); 4] = [
    ("CACHE_DIR", "dir"),
    ("CACHE_EXT", "ext"),
    ("CACHE_NAMESPACE", "namespace"),
    ("DEFAULT_TTL", "ttl"),
];

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache driver name ("file" or "memory")
    pub driver: String,
    /// Options handed to the driver factory
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DRIVER` - Driver name (default: file)
    /// - `CACHE_DIR` - Root directory of the file driver (default: cache)
    /// - `CACHE_EXT` - File extension of the file driver (default: cache)
    /// - `CACHE_NAMESPACE` - Subdirectory prefix of the file driver (default: none)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// # Errors
    /// `CacheError::Configuration` if `DEFAULT_TTL` is set but not a number.
    pub fn from_env() -> Result<Self> {
        let options: HashMap<String, String> = CACHE_VARS
            .iter()
            .filter_map(|(var, option)| env::var(var).ok().map(|v| (option.to_string(), v)))
            .collect();

        Ok(Self {
            driver: env::var("CACHE_DRIVER")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "file".to_string()),
            cache: CacheConfig::from_map(&options)?,
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: "file".to_string(),
            cache: CacheConfig::default(),
            server_port: 3000,
        }
    }
}
