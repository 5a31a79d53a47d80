//! Path Resolver Module
//!
//! Joins the cache root, an optional namespace, a key identifier and the file
//! extension into the location of a cache entry. No I/O happens here.

use std::path::{Path, PathBuf};

use crate::error::{CacheError, Result};

// == Resolve ==
/// Builds `<root>/[<namespace>/]<identifier>.<extension>`.
///
/// `namespace` is expected to have passed [`validate_namespace`]; the
/// identifier is always a [`key::encode`](super::key::encode) digest, so the
/// result stays under `root`.
pub fn resolve(root: &Path, namespace: Option<&str>, extension: &str, identifier: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(ns) = namespace {
        path.push(ns);
    }

    let extension = normalize_extension(extension);
    if extension.is_empty() {
        path.push(identifier);
    } else {
        path.push(format!("{}.{}", identifier, extension));
    }
    path
}

// == Normalize Extension ==
/// Strips leading and trailing dots so `".cache"` and `"cache"` are equivalent.
pub fn normalize_extension(extension: &str) -> &str {
    extension.trim_matches('.')
}

// == Validate Namespace ==
/// Trims surrounding separators and rejects anything that could leave the root.
///
/// Returns `Ok(None)` when nothing is left after trimming.
pub fn validate_namespace(namespace: &str) -> Result<Option<String>> {
    let trimmed = namespace.trim_matches(|c| c == '/' || c == '\\');
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.contains(['/', '\\', '\0']) {
        return Err(CacheError::InvalidArgument(format!(
            "namespace '{}' must be a single path segment",
            namespace
        )));
    }

    if trimmed == "." || trimmed == ".." {
        return Err(CacheError::InvalidArgument(format!(
            "namespace '{}' is not allowed",
            namespace
        )));
    }

    Ok(Some(trimmed.to_string()))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_namespace() {
        let path = resolve(Path::new("/tmp/cache"), None, "cache", "abc");
        assert_eq!(path, PathBuf::from("/tmp/cache/abc.cache"));
    }

    #[test]
    fn test_resolve_with_namespace() {
        let path = resolve(Path::new("/tmp/cache"), Some("users"), "cache", "abc");
        assert_eq!(path, PathBuf::from("/tmp/cache/users/abc.cache"));
    }

    #[test]
    fn test_resolve_trims_extension_dots() {
        let path = resolve(Path::new("root"), None, ".tmp.", "abc");
        assert_eq!(path, PathBuf::from("root/abc.tmp"));
    }

    #[test]
    fn test_resolve_empty_extension() {
        let path = resolve(Path::new("root"), None, "", "abc");
        assert_eq!(path, PathBuf::from("root/abc"));
    }

    #[test]
    fn test_validate_namespace_trims_separators() {
        assert_eq!(validate_namespace("/ns1/").unwrap(), Some("ns1".to_string()));
        assert_eq!(validate_namespace("ns1").unwrap(), Some("ns1".to_string()));
    }

    #[test]
    fn test_validate_namespace_empty() {
        assert_eq!(validate_namespace("").unwrap(), None);
        assert_eq!(validate_namespace("//").unwrap(), None);
    }

    #[test]
    fn test_validate_namespace_rejects_traversal() {
        assert!(matches!(
            validate_namespace(".."),
            Err(CacheError::InvalidArgument(_))
        ));
        assert!(matches!(
            validate_namespace("a/../b"),
            Err(CacheError::InvalidArgument(_))
        ));
        assert!(matches!(
            validate_namespace("a\\b"),
            Err(CacheError::InvalidArgument(_))
        ));
    }
}
