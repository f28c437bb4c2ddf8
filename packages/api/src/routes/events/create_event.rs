use axum::{Extension, Json, extract::State};
use sea_orm::TransactionTrait;

use crate::{
    error::ApiError,
    identity::CurrentUser,
    records::{
        EventBundle,
        write::{self, EventInput},
    },
    state::AppState,
};

/// POST /events - Creates an event with all of its satellite records in one
/// transaction and returns the stored bundle.
#[tracing::instrument(name = "POST /events", skip(state, user, input))]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<EventInput>,
) -> Result<Json<EventBundle>, ApiError> {
    let user = user.require()?;
    if input.name.trim().is_empty() {
        return Err(ApiError::bad_request("Event name is required"));
    }
    if input.marketing_type.trim().is_empty() {
        return Err(ApiError::bad_request("Marketing type is required"));
    }

    let sub = user.sub.clone();
    let event_id = state
        .db
        .transaction::<_, String, ApiError>(|txn| {
            Box::pin(async move { Ok(write::insert_event(txn, &sub, &input).await?) })
        })
        .await?;

    let bundle = state
        .resolver
        .bundle_for_event(&event_id, &user.sub)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;
    Ok(Json(bundle))
}
