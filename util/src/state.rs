//! Application state container shared across Axum route handlers.
//!
//! This struct holds shared resources such as the database connection and the
//! response cache. It is cheap to clone and passed into route handlers via
//! Axum's `State<T>` extractor.

use crate::cache::ResponseCache;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The shared TTL response cache used by cacheable aggregate endpoints.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    cache: ResponseCache,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and cache.
    pub fn new(db: DatabaseConnection, cache: ResponseCache) -> Self {
        Self { db, cache }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the response cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawned tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Returns a cloned handle to the response cache.
    pub fn cache_clone(&self) -> ResponseCache {
        self.cache.clone()
    }
}
