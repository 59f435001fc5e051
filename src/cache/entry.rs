//! Cache Entry Module
//!
//! Defines the tagged value model and the per-key entity with TTL support.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Opaque payload stored by the cache. `Payload::Null` doubles as the
/// absent marker returned for out-of-range indices and missing hash fields.
pub type Payload = serde_json::Value;

// == Value ==
/// The shape-tagged value held by a key.
///
/// Serialized untagged: a list renders as a JSON array and a hash as a
/// JSON object, so clients see plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Single opaque value
    Scalar(Payload),
    /// Ordered sequence of values
    List(Vec<Payload>),
    /// Field name -> value mapping
    Hash(HashMap<String, Payload>),
}

impl Value {
    /// Returns the shape name, used in log lines.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::List(_) => "list",
            Value::Hash(_) => "hash",
        }
    }
}

impl From<Payload> for Value {
    /// Classifies a decoded payload by its JSON shape: arrays become lists,
    /// objects become hashes, everything else is a scalar.
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Array(items) => Value::List(items),
            Payload::Object(fields) => Value::Hash(fields.into_iter().collect()),
            other => Value::Scalar(other),
        }
    }
}

// == Entity ==
/// A stored value plus its absolute expiration time.
#[derive(Debug, Clone)]
pub struct Entity {
    /// The stored value
    pub value: Value,
    /// Expiration timestamp (Unix nanoseconds), `<= 0` = never expires
    pub expires_at: i64,
}

impl Entity {
    // == Constructor ==
    /// Creates a new entity. A zero `ttl` means the entity never expires.
    pub fn new(value: Value, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: expires_at_from_ttl(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entity has expired.
    ///
    /// Boundary condition: an entity is expired once the current time is
    /// greater than or equal to its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_nanos())
    }

    /// Same as [`Entity::is_expired`] against a caller-supplied clock reading,
    /// so a scan can use one timestamp for every entry.
    pub fn is_expired_at(&self, now_nanos: i64) -> bool {
        self.expires_at > 0 && now_nanos >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in nanoseconds.
pub fn current_timestamp_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

/// Converts a TTL into an absolute expiration timestamp; zero maps to the
/// "never expires" sentinel.
pub fn expires_at_from_ttl(ttl: Duration) -> i64 {
    if ttl.is_zero() {
        return 0;
    }
    let ttl_nanos = i64::try_from(ttl.as_nanos()).unwrap_or(i64::MAX);
    current_timestamp_nanos().saturating_add(ttl_nanos)
}

/// Converts a signed second count into a TTL. Zero and negative counts
/// both mean "never expires".
pub fn ttl_from_secs(secs: i64) -> Duration {
    if secs > 0 {
        Duration::from_secs(secs as u64)
    } else {
        Duration::ZERO
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;

    #[test]
    fn test_entity_no_ttl_never_expires() {
        let entity = Entity::new(Value::Scalar(json!("v")), Duration::ZERO);

        assert_eq!(entity.expires_at, 0);
        assert!(!entity.is_expired());
        assert!(!entity.is_expired_at(i64::MAX));
    }

    #[test]
    fn test_entity_with_ttl() {
        let entity = Entity::new(Value::Scalar(json!("v")), Duration::from_secs(60));

        assert!(entity.expires_at > 0);
        assert!(!entity.is_expired());
        let sixty_secs = Duration::from_secs(60).as_nanos() as i64;
        assert!(entity.expires_at <= current_timestamp_nanos() + sixty_secs);
        assert!(!entity.is_expired_at(entity.expires_at - 1));
    }

    #[test]
    fn test_entity_expiration() {
        let entity = Entity::new(Value::Scalar(json!(1)), Duration::from_millis(50));
        assert!(!entity.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entity.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_nanos();
        let entity = Entity {
            value: Value::Scalar(Payload::Null),
            expires_at: now,
        };

        assert!(entity.is_expired_at(now), "Entity should be expired at boundary");
        assert!(!entity.is_expired_at(now - 1));
    }

    #[test]
    fn test_negative_expiry_is_persistent() {
        let entity = Entity {
            value: Value::Scalar(Payload::Null),
            expires_at: -5,
        };
        assert!(!entity.is_expired());
    }

    #[test]
    fn test_ttl_from_secs() {
        assert_eq!(ttl_from_secs(10), Duration::from_secs(10));
        assert_eq!(ttl_from_secs(0), Duration::ZERO);
        assert_eq!(ttl_from_secs(-3), Duration::ZERO);
    }

    #[test]
    fn test_value_from_payload_shapes() {
        assert_eq!(Value::from(json!("text")), Value::Scalar(json!("text")));
        assert_eq!(Value::from(Payload::Null), Value::Scalar(Payload::Null));
        assert_eq!(Value::from(json!([1, 2])), Value::List(vec![json!(1), json!(2)]));

        let hash = Value::from(json!({"a": 1}));
        assert!(matches!(hash, Value::Hash(_)));
        assert_eq!(hash.type_name(), "hash");
    }

    #[test]
    fn test_value_serializes_untagged() {
        let list = Value::List(vec![json!(1), json!("two")]);
        assert_eq!(serde_json::to_value(&list).unwrap(), json!([1, "two"]));

        let scalar = Value::Scalar(json!({"nested": true}));
        assert_eq!(serde_json::to_value(&scalar).unwrap(), json!({"nested": true}));
    }
}
