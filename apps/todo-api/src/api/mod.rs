//! API routes module
//!
//! This module defines all HTTP API routes for the Todo API.

pub mod health;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: Docs, fallbacks and middleware are added by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(todo::router(state))
        .merge(health::router(state.clone()))
}
