//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the cache is alive.
//!
//! # Tasks
//! - Eviction: Removes expired cache entries at a fixed interval

mod eviction;

pub use eviction::{
    effective_interval, spawn_eviction_task, DEFAULT_EVICTION_INTERVAL, MAX_EVICTION_INTERVAL,
};
