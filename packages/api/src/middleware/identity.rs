use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::identity::CurrentUser;
use crate::retry::with_retry;
use crate::state::AppState;

/// Resolves the bearer token into a [`CurrentUser`] request extension.
///
/// Cache first, then the identity service with retry on transient failures.
/// An unresolvable token degrades to [`CurrentUser::Anonymous`] instead of
/// rejecting; handlers that need a user enforce that themselves.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(auth_header) = request.headers().get(AUTHORIZATION)
        && let Ok(header) = auth_header.to_str()
    {
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        if !token.is_empty() {
            if let Some(user) = state.sessions.get(token) {
                request.extensions_mut().insert::<CurrentUser>(CurrentUser::User(user));
                return next.run(request).await;
            }

            match with_retry(&state.retry, || state.identity.user_info(token)).await {
                Ok(user) => {
                    state.sessions.insert(token, user.clone());
                    request
                        .extensions_mut()
                        .insert::<CurrentUser>(CurrentUser::User(user));
                    return next.run(request).await;
                }
                Err(error) => {
                    tracing::warn!(error = %error, "token resolution failed, continuing anonymously");
                }
            }
        }
    }

    request
        .extensions_mut()
        .insert::<CurrentUser>(CurrentUser::Anonymous);
    next.run(request).await
}
