use axum::{
    Extension, Json,
    extract::{Query, State},
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    identity::CurrentUser,
    metrics::{self, DerivedMetrics, RoiPoint},
    records::EventBundle,
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    /// Focus event; defaults to the most recent one.
    pub event_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// `null` when there is no event to show; callers render an empty state.
    pub event: Option<EventBundle>,
    pub metrics: DerivedMetrics,
    pub roi_trend: Vec<RoiPoint>,
}

impl DashboardResponse {
    fn empty() -> Self {
        DashboardResponse {
            event: None,
            metrics: DerivedMetrics::default(),
            roi_trend: Vec::new(),
        }
    }
}

/// GET /dashboard - Single-event drill-down plus the recent ROI trend.
///
/// An unresolvable event is not an error: a fresh account, a missing
/// `eventId` match, or an absent user scope all answer with `event: null`
/// and zeroed metrics so the client renders an empty dashboard.
#[tracing::instrument(name = "GET /dashboard", skip(state, user))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let user_id = match query.user_id.as_deref().or(user.user_id()) {
        Some(id) => id.to_string(),
        None => return Ok(Json(DashboardResponse::empty())),
    };

    let event = match query.event_id {
        Some(event_id) => state.resolver.resolve_event(&event_id, &user_id).await?,
        None => state.resolver.latest_event(&user_id).await?,
    };
    let Some(event) = event else {
        return Ok(Json(DashboardResponse::empty()));
    };

    let bundle = state.resolver.resolve_bundle(event).await;

    let recent = state.resolver.list_events(&user_id).await?;
    let trend_bundles = join_all(
        recent
            .into_iter()
            .take(7)
            .map(|event| state.resolver.resolve_bundle(event)),
    )
    .await;

    Ok(Json(DashboardResponse {
        metrics: metrics::derive_metrics(&bundle),
        roi_trend: metrics::roi_trend(&trend_bundles),
        event: Some(bundle),
    }))
}
