//! memkv - An in-memory key-value cache server
//!
//! Stores scalars, lists and hashes with per-key TTL expiration, evicts
//! expired keys in the background, and serves everything over HTTP.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::Cache;
pub use client::CacheClient;
pub use config::Config;
