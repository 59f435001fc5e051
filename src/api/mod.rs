//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /v1/get/:key`, `POST /v1/set`, `GET /v1/keys`, `DELETE /v1/remove/:key`
//! - `POST /v1/rpush`, `GET /v1/lindex/:key/:index`
//! - `POST /v1/hset`, `GET /v1/hget/:key/:hkey`
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, create_router_with_timeout};
