//! API Handlers
//!
//! HTTP request handlers translating JSON bodies and path parameters into
//! cache engine calls.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::cache::{ttl_from_secs, Cache, Payload, Value};
use crate::error::{CacheError, Result};
use crate::models::{
    HSetRequest, HealthResponse, KeysResponse, RPushRequest, SetRequest, StatsResponse,
    ValueResponse, WriteResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache engine
    pub cache: Arc<Cache>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: Cache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts the cache's eviction task, so this must run inside a tokio
    /// runtime.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(Cache::new(config.eviction_interval()))
    }
}

/// Unwraps a JSON body, turning any decoding failure into a 400.
fn parse_body<T>(body: std::result::Result<Json<T>, JsonRejection>, op: &str) -> Result<T> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            debug!("{} body rejected: {}", op, rejection);
            Err(CacheError::InvalidRequest(format!("{} body is invalid", op)))
        }
    }
}

/// Parses a list index path segment. Negative indices are refused here so
/// the engine only ever sees `usize`.
pub fn parse_index(raw: &str) -> Result<usize> {
    let index: i64 = raw
        .parse()
        .map_err(|_| CacheError::InvalidRequest("index is invalid".to_string()))?;

    usize::try_from(index)
        .map_err(|_| CacheError::InvalidRequest("index can't be negative".to_string()))
}

/// Handler for GET /v1/get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ValueResponse<Value>>> {
    let value = state
        .cache
        .get(&key)
        .await
        .ok_or(CacheError::NotFound(key))?;

    Ok(Json(ValueResponse::new(value)))
}

/// Handler for POST /v1/set
pub async fn set_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<Json<WriteResponse>> {
    let req = parse_body(body, "set")?;
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state
        .cache
        .set(req.key.clone(), Value::from(req.value), ttl_from_secs(req.ttl))
        .await;

    Ok(Json(WriteResponse::new("set", req.key)))
}

/// Handler for GET /v1/keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse {
        keys: state.cache.keys().await,
    })
}

/// Handler for DELETE /v1/remove/:key
///
/// Always answers 204, whether or not the key existed.
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> StatusCode {
    state.cache.remove(&key).await;
    StatusCode::NO_CONTENT
}

/// Handler for POST /v1/rpush
pub async fn rpush_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<RPushRequest>, JsonRejection>,
) -> Result<Json<WriteResponse>> {
    let req = parse_body(body, "rpush")?;
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state
        .cache
        .rpush(&req.key, req.value, ttl_from_secs(req.ttl))
        .await?;

    Ok(Json(WriteResponse::new("rpush", req.key)))
}

/// Handler for GET /v1/lindex/:key/:index
pub async fn lindex_handler(
    State(state): State<AppState>,
    Path((key, index)): Path<(String, String)>,
) -> Result<Json<ValueResponse<Payload>>> {
    let index = parse_index(&index)?;
    let value = state.cache.lindex(&key, index).await?;

    Ok(Json(ValueResponse::new(value)))
}

/// Handler for POST /v1/hset
pub async fn hset_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<HSetRequest>, JsonRejection>,
) -> Result<Json<WriteResponse>> {
    let req = parse_body(body, "hset")?;
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let fields = req.value.unwrap_or_default();
    state
        .cache
        .hset(&req.key, fields, ttl_from_secs(req.ttl))
        .await?;

    Ok(Json(WriteResponse::new("hset", req.key)))
}

/// Handler for GET /v1/hget/:key/:hkey
pub async fn hget_handler(
    State(state): State<AppState>,
    Path((key, hkey)): Path<(String, String)>,
) -> Result<Json<ValueResponse<Payload>>> {
    let value = state.cache.hget(&key, &hkey).await?;
    Ok(Json(ValueResponse::new(value)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
