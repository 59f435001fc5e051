//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies. The client
//! reuses them to build requests and decode answers.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{HSetRequest, RPushRequest, SetRequest};
pub use responses::{
    ErrorResponse, HealthResponse, KeysResponse, StatsResponse, ValueResponse, WriteResponse,
};
