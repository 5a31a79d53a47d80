//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::Ttl;
use crate::error::{CacheError, Result};

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value to store
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    pub fn ttl(&self) -> Option<Ttl> {
        self.ttl.map(Ttl::secs)
    }
}

/// Body of the bulk key operations (POST /get-multiple, POST /del-multiple)
///
/// Parsed from a raw JSON value so that a `keys` field of the wrong shape is
/// reported as an invalid argument before any key is touched.
#[derive(Debug, Clone, PartialEq)]
pub struct KeysRequest {
    /// Keys to operate on, in request order
    pub keys: Vec<String>,
}

impl KeysRequest {
    /// Extracts `{"keys": [..]}` from a JSON body.
    pub fn from_value(body: Value) -> Result<Self> {
        let keys = match body {
            Value::Object(mut map) => map.remove("keys"),
            _ => None,
        };

        match keys {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(key) => Ok(key),
                    other => Err(CacheError::InvalidArgument(format!(
                        "keys must be strings, got {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(|keys| Self { keys }),
            _ => Err(CacheError::InvalidArgument(
                "keys is neither an array nor a sequence".to_string(),
            )),
        }
    }
}

/// Body of the bulk set operation (PUT /set-multiple)
#[derive(Debug, Clone, PartialEq)]
pub struct SetMultipleRequest {
    /// Key/value pairs to store
    pub values: Vec<(String, Value)>,
    /// Optional TTL in seconds applied to every pair
    pub ttl: Option<Ttl>,
}

impl SetMultipleRequest {
    /// Extracts `{"values": {..}, "ttl": n}` from a JSON body.
    pub fn from_value(body: Value) -> Result<Self> {
        let Value::Object(mut map) = body else {
            return Err(CacheError::InvalidArgument(
                "request body must be an object".to_string(),
            ));
        };

        let values = match map.remove("values") {
            Some(Value::Object(values)) => values.into_iter().collect(),
            _ => {
                return Err(CacheError::InvalidArgument(
                    "values is neither an object nor a map".to_string(),
                ))
            }
        };

        let ttl = match map.remove("ttl") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => match n.as_i64() {
                Some(secs) => Some(Ttl::secs(secs)),
                None => {
                    return Err(CacheError::InvalidArgument(format!(
                        "ttl must be whole seconds, got {}",
                        n
                    )))
                }
            },
            Some(other) => {
                return Err(CacheError::InvalidArgument(format!(
                    "ttl must be a number, got {}",
                    other
                )))
            }
        };

        Ok(Self { values, ttl })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": {"nested": [1, 2]}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, json!({"nested": [1, 2]}));
        assert!(req.ttl().is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": "hello", "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl(), Some(Ttl::secs(60)));
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: json!("test"),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_keys_request() {
        let req = KeysRequest::from_value(json!({"keys": ["a", "b"]})).unwrap();
        assert_eq!(req.keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_keys_request_rejects_non_array() {
        for body in [json!({"keys": "a"}), json!({}), json!(["a"]), json!({"keys": [1]})] {
            assert!(matches!(
                KeysRequest::from_value(body),
                Err(CacheError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_set_multiple_request() {
        let req = SetMultipleRequest::from_value(json!({"values": {"a": 1, "b": [2]}, "ttl": 30}))
            .unwrap();
        assert_eq!(req.values.len(), 2);
        assert!(req.values.contains(&("b".to_string(), json!([2]))));
        assert_eq!(req.ttl, Some(Ttl::secs(30)));
    }

    #[test]
    fn test_set_multiple_request_rejects_bad_shapes() {
        for body in [
            json!({"values": [1, 2]}),
            json!({"values": {"a": 1}, "ttl": "soon"}),
            json!({"values": {"a": 1}, "ttl": 1.5}),
            json!("values"),
        ] {
            assert!(matches!(
                SetMultipleRequest::from_value(body),
                Err(CacheError::InvalidArgument(_))
            ));
        }
    }
}
