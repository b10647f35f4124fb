//! Health check endpoints

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, health_router, run_health_checks};

use crate::state::AppState;

/// `/health` (liveness) and `/ready` (database ping)
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health_router(state.config.app))
        .merge(
            Router::new()
                .route("/ready", get(readiness_check))
                .with_state(state),
        )
}

/// Readiness check - verifies the PostgreSQL connection
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Dependencies reachable"),
        (status = 503, description = "A dependency is unreachable")
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await.into_response()
}
