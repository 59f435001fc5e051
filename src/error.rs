//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine and its HTTP adapter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Key does not exist or has expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key holds a value that is not a list
    #[error("Wrong type: value at '{0}' is not a list")]
    WrongTypeList(String),

    /// Key holds a value that is not a hash
    #[error("Wrong type: value at '{0}' is not a hash")]
    WrongTypeHash(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// Returns true for either wrong-type kind.
    pub fn is_wrong_type(&self) -> bool {
        matches!(
            self,
            CacheError::WrongTypeList(_) | CacheError::WrongTypeHash(_)
        )
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::WrongTypeList(_) | CacheError::WrongTypeHash(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
