//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a JSON value with optional TTL, priority and tags
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `DELETE /clear` - Drop every entry
//! - `POST /cleanup` - Sweep expired entries now
//! - `GET /tags/:tag` - List live entries carrying a tag
//! - `DELETE /tags/:tag` - Delete entries carrying a tag
//! - `GET /export` - Snapshot live entries
//! - `POST /import` - Load a snapshot
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
