//! Cache Module
//!
//! Pluggable key-value caching with TTL expiration.
//!
//! [`CacheDriver`] is the contract; [`FileCacheStore`] keeps one file per
//! entry on disk and [`MemoryCacheStore`] keeps entries in process memory.
//! [`factory::create`] picks one by name.

pub mod factory;
mod driver;
mod file;
pub mod key;
mod memory;
pub mod path;
mod record;
mod ttl;


// Re-export public types
pub use driver::CacheDriver;
pub use factory::{CacheConfig, DriverKind};
pub use file::FileCacheStore;
pub use memory::MemoryCacheStore;
pub use record::CacheRecord;
pub use ttl::Ttl;
