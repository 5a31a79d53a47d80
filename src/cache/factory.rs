//! Driver Factory Module
//!
//! Builds a cache driver from a driver name and a configuration map.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::cache::{CacheDriver, FileCacheStore, MemoryCacheStore, Ttl};
use crate::error::{CacheError, Result};

/// Default root directory for the file driver.
pub const DEFAULT_DIR: &str = "cache";

/// Default file extension for the file driver.
pub const DEFAULT_EXT: &str = "cache";

/// Default TTL in seconds.
pub const DEFAULT_TTL_SECS: i64 = 300;

// == Driver Kind ==
/// The available backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverKind {
    /// One file per entry under a root directory
    #[default]
    File,
    /// In-process shared memory
    Memory,
}

impl DriverKind {
    /// Resolves a driver name. An empty name selects the file driver.
    ///
    /// `"apcu"` is accepted as an alias of `"memory"`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "file" => Ok(DriverKind::File),
            "memory" | "apcu" => Ok(DriverKind::Memory),
            other => Err(CacheError::Configuration(format!(
                "unknown cache driver '{}'",
                other
            ))),
        }
    }
}

impl FromStr for DriverKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverKind::File => f.write_str("file"),
            DriverKind::Memory => f.write_str("memory"),
        }
    }
}

// == Cache Config ==
/// Construction options shared by the drivers.
///
/// The memory driver only reads `ttl`.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Root directory for the file driver
    pub dir: PathBuf,
    /// File extension for the file driver
    pub ext: String,
    /// Optional subdirectory prefix for the file driver
    pub namespace: Option<String>,
    /// Default TTL
    pub ttl: Ttl,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            ext: DEFAULT_EXT.to_string(),
            namespace: None,
            ttl: Ttl::secs(DEFAULT_TTL_SECS),
        }
    }
}

impl CacheConfig {
    /// Reads `dir`, `ext`, `namespace` and `ttl` from a string map.
    ///
    /// Missing or empty options keep their defaults; unknown options are ignored.
    ///
    /// # Errors
    /// `CacheError::Configuration` if `ttl` is not an integer.
    pub fn from_map(options: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();
        let option = |name: &str| options.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(dir) = option("dir") {
            config.dir = PathBuf::from(dir);
        }
        if let Some(ext) = option("ext") {
            config.ext = ext.to_string();
        }
        config.namespace = option("namespace").map(str::to_string);
        if let Some(ttl) = option("ttl") {
            let secs: i64 = ttl.parse().map_err(|_| {
                CacheError::Configuration(format!("ttl '{}' is not a number of seconds", ttl))
            })?;
            config.ttl = Ttl::secs(secs);
        }

        Ok(config)
    }
}

// == Create ==
/// Builds the driver named `driver` from `config`.
///
/// # Errors
/// `CacheError::Configuration` for unknown driver names or an unusable
/// cache directory; `CacheError::InvalidArgument` for a bad namespace.
pub fn create(driver: &str, config: &CacheConfig) -> Result<Box<dyn CacheDriver>> {
    let kind = DriverKind::from_name(driver)?;
    info!("Creating {} cache driver", kind);

    match kind {
        DriverKind::File => {
            let mut store = FileCacheStore::new(&config.dir, &config.ext, config.ttl)?;
            store.set_namespace(config.namespace.as_deref())?;
            Ok(Box::new(store))
        }
        DriverKind::Memory => Ok(Box::new(MemoryCacheStore::new(config.ttl))),
    }
}
