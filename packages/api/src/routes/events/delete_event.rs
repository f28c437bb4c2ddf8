use axum::{
    Extension, Json,
    extract::{Path, State},
};
use sea_orm::TransactionTrait;
use serde::Serialize;

use crate::{error::ApiError, identity::CurrentUser, records::write, state::AppState};

#[derive(Debug, Serialize)]
pub struct DeleteEventResponse {
    pub deleted: bool,
}

/// DELETE /events/{event_id} - Removes the event and its satellite rows in
/// one transaction.
#[tracing::instrument(name = "DELETE /events/{event_id}", skip(state, user))]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<String>,
) -> Result<Json<DeleteEventResponse>, ApiError> {
    let user = user.require()?;
    let event = state
        .resolver
        .resolve_event(&event_id, &user.sub)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;

    let generation = event.generation;
    let id = event.id.clone();
    let rows = state
        .db
        .transaction::<_, u64, ApiError>(|txn| {
            Box::pin(async move { Ok(write::delete_event(txn, generation, &id).await?) })
        })
        .await?;

    tracing::debug!(rows, "event removed");
    Ok(Json(DeleteEventResponse { deleted: true }))
}
