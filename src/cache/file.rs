//! File Cache Store Module
//!
//! Cache driver that keeps one file per entry under a root directory.
//!
//! Entries live at `<root>/[<namespace>/]<sha256(key)>.<ext>` and hold a
//! JSON-encoded [`CacheRecord`]. Writes go to a temporary file in the target
//! directory which is then renamed over the entry, so a concurrent reader
//! sees either the old file, the new file, or nothing.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::cache::{key, path, CacheDriver, CacheRecord, Ttl};
use crate::error::{CacheError, Result};

// == File Cache Store ==
/// Filesystem-backed cache with per-entry TTL.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    /// Root cache directory
    root: PathBuf,
    /// File extension without dots
    extension: String,
    /// Optional subdirectory scoping subsequent keys
    namespace: Option<String>,
    /// TTL applied when `set` is called without one
    default_ttl: Ttl,
}

impl FileCacheStore {
    // == Constructor ==
    /// Creates a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// `CacheError::Configuration` if the root cannot be created or is not a
    /// directory.
    pub fn new(root: impl Into<PathBuf>, extension: &str, default_ttl: Ttl) -> Result<Self> {
        let root = root.into();

        fs::create_dir_all(&root).map_err(|e| {
            CacheError::Configuration(format!(
                "cache directory '{}' cannot be created: {}",
                root.display(),
                e
            ))
        })?;

        if !root.is_dir() {
            return Err(CacheError::Configuration(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        info!(
            "File cache ready at {} (ext={}, default_ttl={}s)",
            root.display(),
            path::normalize_extension(extension),
            default_ttl.as_secs()
        );

        Ok(Self {
            root,
            extension: path::normalize_extension(extension).to_string(),
            namespace: None,
            default_ttl,
        })
    }

    /// Builder form of [`set_namespace`](Self::set_namespace).
    pub fn with_namespace(mut self, namespace: &str) -> Result<Self> {
        self.set_namespace(Some(namespace))?;
        Ok(self)
    }

    // == Namespace ==
    /// Switches the subdirectory used for subsequent operations.
    ///
    /// Entries stored under a previous namespace stay where they are.
    ///
    /// # Errors
    /// `CacheError::InvalidArgument` if the namespace contains separators
    /// after trimming, or is `.`/`..`.
    pub fn set_namespace(&mut self, namespace: Option<&str>) -> Result<()> {
        self.namespace = match namespace {
            Some(ns) => path::validate_namespace(ns)?,
            None => None,
        };
        Ok(())
    }

    /// Returns the current namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    // == Accessors ==
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn default_ttl(&self) -> Ttl {
        self.default_ttl
    }

    // == Path For ==
    /// Returns the file that backs `key` under the current namespace.
    pub fn path_for(&self, key: &str) -> PathBuf {
        path::resolve(
            &self.root,
            self.namespace.as_deref(),
            &self.extension,
            &key::encode(key),
        )
    }

    // == Internal I/O ==
    /// Reads the record at `path`. A missing file is `Ok(None)`.
    fn read_record(path: &Path) -> Result<Option<CacheRecord>> {
        match fs::read(path) {
            Ok(bytes) => CacheRecord::decode(&bytes).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes `record` to `path` through a temp file and an atomic rename.
    fn write_record(&self, path: &Path, record: &CacheRecord) -> Result<()> {
        let bytes = record.encode()?;
        let dir = path.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Unlinks `path` if the record there is still expired or undecodable.
    ///
    /// A `set` that lands between the first read and this re-read is kept.
    /// One that lands between the re-read and the unlink can still be lost;
    /// the window is a single syscall and the caller sees a miss.
    fn evict_if_stale(path: &Path) -> bool {
        match Self::read_record(path) {
            Ok(Some(record)) if !record.is_expired() => false,
            Ok(None) => false,
            Ok(Some(_)) | Err(CacheError::Decode(_)) => Self::remove_file(path),
            Err(e) => {
                warn!("Failed to re-read cache entry {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Unlinks `path`. Returns `false` when nothing was there or removal failed.
    fn remove_file(path: &Path) -> bool {
        match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                warn!("Failed to remove cache file {}: {}", path.display(), e);
                false
            }
        }
    }
}

// == Clear Helpers ==
/// Removes everything below `dir`, children before their parent directory.
///
/// Keeps going after failures and reports whether every removal succeeded.
/// Entries that vanish mid-walk count as removed.
fn clear_dir(dir: &Path) -> bool {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return true,
        Err(e) => {
            warn!("Failed to read cache directory {}: {}", dir.display(), e);
            return false;
        }
    };

    let mut success = true;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", dir.display(), e);
                success = false;
                continue;
            }
        };

        let path = entry.path();
        // file_type() does not follow symlinks, so a linked directory is
        // unlinked rather than walked into.
        let removed = match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {
                let children_removed = clear_dir(&path);
                removal_ok(&path, fs::remove_dir(&path)) && children_removed
            }
            Ok(_) => removal_ok(&path, fs::remove_file(&path)),
            Err(e) => {
                warn!("Failed to stat {}: {}", path.display(), e);
                false
            }
        };

        if !removed {
            success = false;
        }
    }
    success
}

fn removal_ok(path: &Path, outcome: io::Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!("Failed to remove {}: {}", path.display(), e);
            false
        }
    }
}

// == Cache Driver Implementation ==
impl CacheDriver for FileCacheStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn fetch(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key);

        match Self::read_record(&path) {
            Ok(Some(record)) if !record.is_expired() => Some(record.value),
            Ok(Some(_)) => {
                debug!("Evicting expired entry {}", path.display());
                Self::evict_if_stale(&path);
                None
            }
            Ok(None) => None,
            Err(CacheError::Decode(e)) => {
                warn!("Discarding unreadable entry {}: {}", path.display(), e);
                Self::evict_if_stale(&path);
                None
            }
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Ttl>) -> bool {
        let path = self.path_for(key);

        // Drop the previous entry first so a failed write cannot leave it behind.
        if path.exists() {
            Self::remove_file(&path);
        }

        let record = CacheRecord::new(value, ttl.unwrap_or(self.default_ttl));
        match self.write_record(&path, &record) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to write cache entry {}: {}", path.display(), e);
                false
            }
        }
    }

    fn delete(&self, key: &str) -> bool {
        Self::remove_file(&self.path_for(key))
    }

    fn clear(&self) -> bool {
        let success = clear_dir(&self.root);
        debug!("Cleared cache directory {} (success={})", self.root.display(), success);
        success
    }

    fn has(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    fn is_expired(&self, key: &str) -> bool {
        match Self::read_record(&self.path_for(key)) {
            Ok(Some(record)) => record.is_expired(),
            _ => true,
        }
    }
}
