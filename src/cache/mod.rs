//! Cache Module
//!
//! Provides the in-memory store of scalars, lists and hashes with TTL
//! expiration and background eviction.

mod engine;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use engine::Cache;
pub use entry::{
    current_timestamp_nanos, expires_at_from_ttl, ttl_from_secs, Entity, Payload, Value,
};
pub use stats::{CacheStats, StatsRecorder};
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
