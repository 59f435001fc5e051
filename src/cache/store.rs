//! Cache Store Module
//!
//! The key -> entity map and every per-key rule: lazy expiration, shape
//! checks, create-or-append for lists and create-or-merge for hashes.
//! The store itself is not synchronized; [`crate::cache::Cache`] wraps it
//! in a lock.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::entry::{current_timestamp_nanos, Entity, Payload, Value};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Main cache storage with TTL support.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key -> entity storage, possibly holding expired entities that have
    /// not been swept yet
    entries: HashMap<String, Entity>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an entity, hiding it if it has expired.
    fn live(&self, key: &str) -> Option<&Entity> {
        self.entries.get(key).filter(|entity| !entity.is_expired())
    }

    /// Mutable counterpart of [`CacheStore::live`].
    fn live_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.entries.get_mut(key).filter(|entity| !entity.is_expired())
    }

    // == Set ==
    /// Stores `value` at `key`, replacing whatever was there regardless of
    /// shape. A zero `ttl` means the key never expires.
    pub fn set(&mut self, key: String, value: Value, ttl: Duration) {
        self.entries.insert(key, Entity::new(value, ttl));
    }

    // == Get ==
    /// Returns a copy of the value if the key exists and has not expired.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.live(key).map(|entity| entity.value.clone())
    }

    // == Remove ==
    /// Deletes the key. Returns whether anything was stored there.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Keys ==
    /// Returns every non-expired key, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        let now = current_timestamp_nanos();
        self.entries
            .iter()
            .filter(|(_, entity)| !entity.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == RPush ==
    /// Appends `value` to the list at `key`.
    ///
    /// An absent or expired key gets a fresh single-element list with the
    /// given TTL. An existing list keeps its expiry and `ttl` is ignored.
    /// Any other shape fails with [`CacheError::WrongTypeList`] and is left
    /// untouched.
    pub fn rpush(&mut self, key: &str, value: Payload, ttl: Duration) -> Result<()> {
        match self.live_mut(key) {
            Some(entity) => match &mut entity.value {
                Value::List(items) => {
                    items.push(value);
                    Ok(())
                }
                other => {
                    debug!("rpush rejected: key '{}' holds a {}", key, other.type_name());
                    Err(CacheError::WrongTypeList(key.to_string()))
                }
            },
            None => {
                self.set(key.to_string(), Value::List(vec![value]), ttl);
                Ok(())
            }
        }
    }

    // == LIndex ==
    /// Returns the element at zero-based `index` of the list at `key`.
    ///
    /// An index past the end yields `Payload::Null`, not an error.
    pub fn lindex(&self, key: &str, index: usize) -> Result<Payload> {
        let entity = self
            .live(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        match &entity.value {
            Value::List(items) => Ok(items.get(index).cloned().unwrap_or(Payload::Null)),
            other => {
                debug!("lindex rejected: key '{}' holds a {}", key, other.type_name());
                Err(CacheError::WrongTypeList(key.to_string()))
            }
        }
    }

    // == HSet ==
    /// Merges `fields` into the hash at `key`, overwriting on collision.
    ///
    /// An absent or expired key gets a new hash holding exactly `fields`
    /// with the given TTL. An existing hash keeps its expiry. Any other
    /// shape fails with [`CacheError::WrongTypeHash`] and is left untouched.
    pub fn hset(
        &mut self,
        key: &str,
        fields: HashMap<String, Payload>,
        ttl: Duration,
    ) -> Result<()> {
        match self.live_mut(key) {
            Some(entity) => match &mut entity.value {
                Value::Hash(existing) => {
                    existing.extend(fields);
                    Ok(())
                }
                other => {
                    debug!("hset rejected: key '{}' holds a {}", key, other.type_name());
                    Err(CacheError::WrongTypeHash(key.to_string()))
                }
            },
            None => {
                self.set(key.to_string(), Value::Hash(fields), ttl);
                Ok(())
            }
        }
    }

    // == HGet ==
    /// Returns `field` of the hash at `key`; a missing field yields
    /// `Payload::Null`.
    pub fn hget(&self, key: &str, field: &str) -> Result<Payload> {
        let entity = self
            .live(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        match &entity.value {
            Value::Hash(fields) => Ok(fields.get(field).cloned().unwrap_or(Payload::Null)),
            other => {
                debug!("hget rejected: key '{}' holds a {}", key, other.type_name());
                Err(CacheError::WrongTypeHash(key.to_string()))
            }
        }
    }

    // == Evict Expired ==
    /// Physically removes every expired entity.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self) -> usize {
        let now = current_timestamp_nanos();
        let before = self.entries.len();
        self.entries.retain(|_, entity| !entity.is_expired_at(now));
        before - self.entries.len()
    }

    /// Returns true if the key is physically stored, expired or not.
    pub fn contains_raw(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones that
    /// have not been evicted yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
