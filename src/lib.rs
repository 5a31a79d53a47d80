//! TTL Cache - A pluggable key-value cache
//!
//! Provides a file-backed driver and an in-memory driver behind one
//! [`CacheDriver`](cache::CacheDriver) contract, with per-entry TTL
//! expiration, plus an HTTP front end for running the cache as a service.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheDriver, FileCacheStore, MemoryCacheStore, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
