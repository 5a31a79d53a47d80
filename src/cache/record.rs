//! Cache Record Module
//!
//! Defines the persisted cache record and its byte encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::Ttl;
use crate::error::Result;

// == Cache Record ==
/// A stored value together with its absolute expiry.
///
/// Values are any JSON value. Cyclic structures cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// The stored value
    pub value: Value,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: i64,
}

impl CacheRecord {
    // == Constructor ==
    /// Creates a record that expires `ttl` from now.
    ///
    /// Expiry is kept in milliseconds so a TTL of `n` seconds lasts a full
    /// `n` seconds wherever in the current second the write happens.
    pub fn new(value: Value, ttl: Ttl) -> Self {
        Self {
            value,
            expires_at: current_timestamp_ms().saturating_add(ttl.as_secs().saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks if the record has expired.
    ///
    /// A record is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Checks expiry against an explicit Unix timestamp in milliseconds.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at <= now_ms
    }

    // == Encode ==
    /// Serializes the record to the bytes written on disk.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    // == Decode ==
    /// Parses a record from bytes, failing with `CacheError::Decode` on
    /// malformed or truncated input.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_record_creation() {
        let record = CacheRecord::new(json!("test_value"), Ttl::secs(60));

        assert_eq!(record.value, json!("test_value"));
        assert!(!record.is_expired());

        let remaining = record.expires_at - current_timestamp_ms();
        assert!(remaining <= 60_000);
        assert!(remaining > 59_000);
    }

    #[test]
    fn test_record_expiration() {
        let record = CacheRecord::new(json!(1), Ttl::secs(1));

        assert!(!record.is_expired());

        sleep(Duration::from_millis(1100));

        assert!(record.is_expired());
    }

    #[test]
    fn test_one_second_ttl_survives_second_boundary() {
        // Write just before a wall-clock second rolls over, read just after.
        while current_timestamp_ms() % 1000 < 990 {
            sleep(Duration::from_millis(2));
        }
        let record = CacheRecord::new(json!("v"), Ttl::secs(1));

        sleep(Duration::from_millis(20));

        assert!(!record.is_expired());
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let record = CacheRecord::new(json!(1), Ttl::secs(i64::MAX));
        assert_eq!(record.expires_at, i64::MAX);
        assert!(!record.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let record = CacheRecord::new(json!(null), Ttl::secs(0));
        assert!(record.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let record = CacheRecord {
            value: json!("test"),
            expires_at: 1_000,
        };

        assert!(!record.is_expired_at(999));
        assert!(record.is_expired_at(1_000), "Record should be expired at boundary");
        assert!(record.is_expired_at(1_001));
    }

    #[test]
    fn test_encode_decode_nested_value() {
        let record = CacheRecord::new(
            json!({"name": "n", "tags": ["a", "b"], "score": 1.5, "nested": {"ok": true}}),
            Ttl::secs(300),
        );

        let bytes = record.encode().unwrap();
        let decoded = CacheRecord::decode(&bytes).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_truncated_payload() {
        let bytes = CacheRecord::new(json!("value"), Ttl::secs(60)).encode().unwrap();
        let torn = &bytes[..bytes.len() / 2];

        assert!(matches!(CacheRecord::decode(torn), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            CacheRecord::decode(b"not a record"),
            Err(CacheError::Decode(_))
        ));
        assert!(matches!(
            CacheRecord::decode(br#"{"value": 1}"#),
            Err(CacheError::Decode(_))
        ));
    }
}
