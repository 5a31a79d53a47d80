//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.
//!
//! Driver calls block on filesystem I/O, so every handler runs them on the
//! blocking thread pool.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{factory, CacheDriver};
use crate::error::{CacheError, Result};
use crate::models::{
    BulkResponse, DeleteResponse, GetMultipleResponse, GetResponse, HasResponse, HealthResponse,
    KeysRequest, SetMultipleRequest, SetRequest, SetResponse,
};

/// Application state shared across all handlers.
///
/// Holds the active cache driver behind an `Arc`; drivers synchronize
/// internally, so no outer lock is needed.
#[derive(Clone)]
pub struct AppState {
    /// Active cache driver
    pub cache: Arc<dyn CacheDriver>,
}

impl AppState {
    /// Creates a new AppState around the given driver.
    pub fn new(cache: impl CacheDriver + 'static) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the configured driver through the factory.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let cache = factory::create(&config.driver, &config.cache)?;
        Ok(Self {
            cache: Arc::from(cache),
        })
    }

    /// Runs `op` against the driver on the blocking thread pool.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&dyn CacheDriver) -> T + Send + 'static,
        T: Send + 'static,
    {
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || op(cache.as_ref()))
            .await
            .map_err(|e| CacheError::Internal(format!("cache task failed: {}", e)))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let ttl = req.ttl();
    let key = req.key.clone();
    let stored = state
        .run(move |cache| cache.set(&req.key, req.value, ttl))
        .await?;

    if !stored {
        return Err(CacheError::Internal(format!("Failed to store key '{}'", key)));
    }
    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. Missing and expired entries are
/// both reported as not found; an expired entry is evicted on the way.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let lookup_key = key.clone();
    let value = state.run(move |cache| cache.fetch(&lookup_key)).await?;

    match value {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    let lookup_key = key.clone();
    let (exists, expired) = state
        .run(move |cache| (cache.has(&lookup_key), cache.is_expired(&lookup_key)))
        .await?;

    Ok(Json(HasResponse {
        key,
        exists,
        expired,
    }))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let lookup_key = key.clone();
    let deleted = state.run(move |cache| cache.delete(&lookup_key)).await?;

    if !deleted {
        return Err(CacheError::NotFound(key));
    }
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /get-multiple
pub async fn get_multiple_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GetMultipleResponse>> {
    let req = KeysRequest::from_value(body)?;
    let values = state
        .run(move |cache| cache.get_multiple(&req.keys, Value::Null))
        .await?;

    Ok(Json(GetMultipleResponse { values }))
}

/// Handler for PUT /set-multiple
pub async fn set_multiple_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<BulkResponse>> {
    let req = SetMultipleRequest::from_value(body)?;
    let success = state
        .run(move |cache| cache.set_multiple(req.values, req.ttl))
        .await?;

    Ok(Json(BulkResponse { success }))
}

/// Handler for POST /del-multiple
pub async fn delete_multiple_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<BulkResponse>> {
    let req = KeysRequest::from_value(body)?;
    let success = state
        .run(move |cache| cache.delete_multiple(&req.keys))
        .await?;

    Ok(Json(BulkResponse { success }))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<BulkResponse>> {
    let success = state.run(|cache| cache.clear()).await?;
    Ok(Json(BulkResponse { success }))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.name()))
}
