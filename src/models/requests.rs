//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cache::{Payload, MAX_KEY_LENGTH};

/// Shared key check for every write body.
fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Request body for the SET operation (POST /v1/set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value; arrays are stored as lists, objects as hashes
/// - `ttl`: TTL in seconds, `<= 0` or omitted means no expiration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRequest {
    pub key: String,
    #[serde(default)]
    pub value: Payload,
    #[serde(default)]
    pub ttl: i64,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key).or_else(|| {
            self.value
                .is_null()
                .then(|| "Value is required".to_string())
        })
    }
}

/// Request body for the RPUSH operation (POST /v1/rpush)
///
/// `ttl` only applies when the list is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RPushRequest {
    pub key: String,
    #[serde(default)]
    pub value: Payload,
    #[serde(default)]
    pub ttl: i64,
}

impl RPushRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key).or_else(|| {
            self.value
                .is_null()
                .then(|| "Value is required".to_string())
        })
    }
}

/// Request body for the HSET operation (POST /v1/hset)
///
/// `value` holds the fields to merge; `ttl` only applies when the hash is
/// created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HSetRequest {
    pub key: String,
    #[serde(default)]
    pub value: Option<HashMap<String, Payload>>,
    #[serde(default)]
    pub ttl: i64,
}

impl HSetRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key).or_else(|| {
            self.value
                .is_none()
                .then(|| "Value must be a JSON object".to_string())
        })
    }
}
