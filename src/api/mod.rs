//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /has/:key` - Existence and expiry of a key
//! - `DELETE /del/:key` - Delete a key
//! - `POST /get-multiple`, `PUT /set-multiple`, `POST /del-multiple` - Bulk operations
//! - `DELETE /clear` - Remove every entry
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
