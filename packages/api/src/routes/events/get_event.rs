use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{error::ApiError, identity::CurrentUser, records::EventBundle, state::AppState};

/// GET /events/{event_id} - Full record bundle for a single event.
#[tracing::instrument(name = "GET /events/{event_id}", skip(state, user))]
pub async fn get_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<String>,
) -> Result<Json<EventBundle>, ApiError> {
    let user = user.require()?;
    let bundle = state
        .resolver
        .bundle_for_event(&event_id, &user.sub)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;
    Ok(Json(bundle))
}
