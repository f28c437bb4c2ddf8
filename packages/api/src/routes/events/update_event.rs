use axum::{
    Extension, Json,
    extract::{Path, State},
};
use sea_orm::TransactionTrait;

use crate::{
    error::ApiError,
    identity::CurrentUser,
    records::{
        EventBundle,
        write::{self, EventPatch},
    },
    state::AppState,
};

/// PUT /events/{event_id} - Applies a partial update inside the generation
/// that owns the event and returns the refreshed bundle.
#[tracing::instrument(name = "PUT /events/{event_id}", skip(state, user, patch))]
pub async fn update_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<EventBundle>, ApiError> {
    let user = user.require()?;
    let event = state
        .resolver
        .resolve_event(&event_id, &user.sub)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;

    let generation = event.generation;
    let id = event.id.clone();
    state
        .db
        .transaction::<_, (), ApiError>(|txn| {
            Box::pin(async move { Ok(write::update_event(txn, generation, &id, &patch).await?) })
        })
        .await?;

    let bundle = state
        .resolver
        .bundle_for_event(&event_id, &user.sub)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;
    Ok(Json(bundle))
}
