use std::time::Instant;

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/db", get(db_health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub status: &'static str,
    pub latency_ms: u128,
}

/// Liveness probe; answers as long as the process is up.
#[tracing::instrument(name = "GET /health")]
pub async fn health() -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe; round-trips the database so a wedged pool shows up here
/// before it shows up as failing requests.
#[tracing::instrument(name = "GET /health/db", skip(state))]
pub async fn db_health(State(state): State<AppState>) -> Result<Json<DatabaseHealth>, ApiError> {
    let started = Instant::now();
    state
        .db
        .ping()
        .await
        .map_err(|err| ApiError::service_unavailable(format!("database ping failed: {err}")))?;

    Ok(Json(DatabaseHealth {
        status: "ok",
        latency_ms: started.elapsed().as_millis(),
    }))
}
