//! Application state management.
//!
//! This module defines the shared application state passed to route
//! constructors and the readiness handler.

use sea_orm::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection is a handle to a shared pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
}
