use axum::{Router, routing::get};

use crate::state::AppState;

pub mod create_event;
pub mod delete_event;
pub mod get_event;
pub mod list_events;
pub mod update_event;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_events::list_events).post(create_event::create_event),
        )
        .route(
            "/{event_id}",
            get(get_event::get_event)
                .put(update_event::update_event)
                .delete(delete_event::delete_event),
        )
}
