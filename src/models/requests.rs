//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::SetOptions;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl_ms`: Optional TTL in milliseconds (uses default if not specified)
/// - `priority`: Optional eviction weight
/// - `tags`: Optional labels for grouped invalidation
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.tags.iter().any(String::is_empty) {
            return Some("Tags cannot be empty".to_string());
        }
        None
    }

    /// Splits the request into key, value and cache options.
    pub fn into_parts(self) -> (String, Value, SetOptions) {
        let options = SetOptions {
            ttl_ms: self.ttl_ms,
            priority: self.priority,
            tags: self.tags,
        };
        (self.key, self.value, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": {"n": 1}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, json!({"n": 1}));
        assert!(req.ttl_ms.is_none());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_set_request_with_options() {
        let json = r#"{"key": "t", "value": "v", "ttl_ms": 60, "priority": 2, "tags": ["a"]}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();

        let (key, value, options) = req.into_parts();
        assert_eq!(key, "t");
        assert_eq!(value, json!("v"));
        assert_eq!(
            options,
            SetOptions::new().with_ttl_ms(60).with_priority(2).with_tag("a")
        );
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: json!("test"),
            ttl_ms: None,
            priority: None,
            tags: vec![],
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_empty_tag() {
        let req = SetRequest {
            key: "k".to_string(),
            value: json!(1),
            ttl_ms: None,
            priority: None,
            tags: vec!["".to_string()],
        };
        assert!(req.validate().is_some());
    }
}
