use axum::{Router, routing::get};

use crate::state::AppState;

pub mod get_analytics;
pub mod get_dashboard;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(get_analytics::get_analytics))
        .route("/dashboard", get(get_dashboard::get_dashboard))
}
