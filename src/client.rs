//! HTTP Client Module
//!
//! Thin async client for the cache server's REST API.

use std::collections::HashMap;

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::cache::Payload;
use crate::models::{
    ErrorResponse, HSetRequest, HealthResponse, KeysResponse, RPushRequest, SetRequest,
    ValueResponse,
};

// == Client Error ==
/// Errors returned by [`CacheClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered 404
    #[error("Not found")]
    NotFound,

    /// The server answered with another non-success status
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The endpoint is not a usable base URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

// == Cache Client ==
/// Client bound to one server endpoint, e.g. `http://127.0.0.1:63100`.
#[derive(Debug, Clone)]
pub struct CacheClient {
    endpoint: String,
    http: reqwest::Client,
}

impl CacheClient {
    /// Creates a client with a default `reqwest::Client`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http_client(endpoint, reqwest::Client::new())
    }

    /// Creates a client reusing a caller-configured `reqwest::Client`
    /// (timeouts, pooling, ...).
    pub fn with_http_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { endpoint, http }
    }

    /// Joins `segments` onto the endpoint, percent-encoding each one so keys
    /// containing `/`, `?` or `#` stay a single path segment.
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", self.endpoint, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidEndpoint(self.endpoint.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Returns the value at `key`. Lists come back as JSON arrays and
    /// hashes as JSON objects.
    pub async fn get(&self, key: &str) -> ClientResult<Payload> {
        let response = self.http.get(self.url(&["v1", "get", key])?).send().await?;
        let body: ValueResponse<Payload> = decode(response).await?;
        Ok(body.value)
    }

    /// Stores `value` at `key`. `ttl` is in seconds, `<= 0` for no expiry.
    pub async fn set(&self, key: &str, value: Payload, ttl: i64) -> ClientResult<()> {
        let body = SetRequest {
            key: key.to_string(),
            value,
            ttl,
        };
        let response = self.http.post(self.url(&["v1", "set"])?).json(&body).send().await?;
        check(response).await.map(drop)
    }

    /// Lists every live key.
    pub async fn keys(&self) -> ClientResult<Vec<String>> {
        let response = self.http.get(self.url(&["v1", "keys"])?).send().await?;
        let body: KeysResponse = decode(response).await?;
        Ok(body.keys)
    }

    /// Deletes `key`; succeeds whether or not it existed.
    pub async fn remove(&self, key: &str) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&["v1", "remove", key])?)
            .send()
            .await?;
        check(response).await.map(drop)
    }

    /// Appends `value` to the list at `key`.
    pub async fn rpush(&self, key: &str, value: Payload, ttl: i64) -> ClientResult<()> {
        let body = RPushRequest {
            key: key.to_string(),
            value,
            ttl,
        };
        let response = self.http.post(self.url(&["v1", "rpush"])?).json(&body).send().await?;
        check(response).await.map(drop)
    }

    /// Returns the list element at `index`; null past the end.
    pub async fn lindex(&self, key: &str, index: usize) -> ClientResult<Payload> {
        let index = index.to_string();
        let response = self
            .http
            .get(self.url(&["v1", "lindex", key, &index])?)
            .send()
            .await?;
        let body: ValueResponse<Payload> = decode(response).await?;
        Ok(body.value)
    }

    /// Merges `fields` into the hash at `key`.
    pub async fn hset(
        &self,
        key: &str,
        fields: HashMap<String, Payload>,
        ttl: i64,
    ) -> ClientResult<()> {
        let body = HSetRequest {
            key: key.to_string(),
            value: Some(fields),
            ttl,
        };
        let response = self.http.post(self.url(&["v1", "hset"])?).json(&body).send().await?;
        check(response).await.map(drop)
    }

    /// Returns `field` of the hash at `key`; null when the field is missing.
    pub async fn hget(&self, key: &str, field: &str) -> ClientResult<Payload> {
        let response = self
            .http
            .get(self.url(&["v1", "hget", key, field])?)
            .send()
            .await?;
        let body: ValueResponse<Payload> = decode(response).await?;
        Ok(body.value)
    }

    /// Calls the health endpoint.
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self.http.get(self.url(&["health"])?).send().await?;
        decode(response).await
    }
}

/// Maps non-success statuses to [`ClientError`], pulling the message out
/// of an `{"error": ...}` body when there is one.
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .map(|body| body.error);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    Ok(check(response).await?.json::<T>().await?)
}
