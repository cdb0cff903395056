//! Request and Response models for the cache server API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::SetRequest;
pub use responses::{
    format_bytes, DeleteResponse, ErrorResponse, GetResponse, HealthResponse, ImportResponse,
    RemovedResponse, SetResponse, StatsResponse, TagResponse, TaggedEntry,
};
