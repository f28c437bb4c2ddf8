mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{seed_current_event, seed_legacy_event, setup_db};
use eventlift_api::axum::body::{Body, to_bytes};
use eventlift_api::axum::http::{Request, StatusCode, header};
use eventlift_api::axum::response::Response;
use eventlift_api::construct_router;
use eventlift_api::identity::UserInfo;
use eventlift_api::retry::RetryPolicy;
use eventlift_api::state::{State, StateConfig};
use serde_json::Value;
use tower::ServiceExt;

// Nothing listens on port 1, so any request that actually reaches the
// identity service fails instead of resolving a user.
const DEAD_IDENTITY_URL: &str = "http://127.0.0.1:1";

fn test_config() -> StateConfig {
    StateConfig {
        identity_base_url: DEAD_IDENTITY_URL.to_string(),
        session_ttl: Duration::from_secs(240),
        retry: RetryPolicy {
            max_attempts: 1,
            initial_delay: Duration::from_millis(1),
        },
    }
}

fn user(sub: &str) -> UserInfo {
    UserInfo {
        sub: sub.to_string(),
        email: None,
        name: None,
    }
}

fn list_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/api/events");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn a_cached_session_authenticates_without_the_identity_service() {
    let db = setup_db().await;
    seed_current_event(&db, "evt-new", "user-1", "Current Seminar", (2025, 6, 1)).await;
    seed_legacy_event(&db, "evt-old", "user-1", "Legacy Dinner", (2024, 2, 9)).await;

    let state = Arc::new(State::with_connection(db, test_config()));
    state.sessions.insert("token-1", user("user-1"));

    let response = construct_router(state)
        .oneshot(list_request(Some("token-1")))
        .await
        .unwrap();

    // A cache miss would hit the dead identity service, degrade to anonymous
    // and come back 401; only the cached session can authenticate this.
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["evt-new", "evt-old"]);
}

#[tokio::test]
async fn requests_without_a_token_stay_anonymous() {
    let db = setup_db().await;
    let state = Arc::new(State::with_connection(db, test_config()));

    let response = construct_router(state)
        .oneshot(list_request(None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn an_expired_session_no_longer_authenticates() {
    let db = setup_db().await;
    let mut config = test_config();
    config.session_ttl = Duration::ZERO;

    let state = Arc::new(State::with_connection(db, config));
    state.sessions.insert("token-1", user("user-1"));

    let response = construct_router(state)
        .oneshot(list_request(Some("token-1")))
        .await
        .unwrap();

    // The stale entry is a miss, re-resolution fails against the dead
    // identity service, and the request proceeds anonymously.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
