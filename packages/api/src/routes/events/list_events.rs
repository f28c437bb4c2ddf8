use axum::{Extension, Json, extract::State};

use crate::{error::ApiError, identity::CurrentUser, records::EventRecord, state::AppState};

/// GET /events - All events owned by the caller, newest first.
#[tracing::instrument(name = "GET /events", skip(state, user))]
pub async fn list_events(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<EventRecord>>, ApiError> {
    let user = user.require()?;
    let events = state.resolver.list_events(&user.sub).await?;
    Ok(Json(events))
}
