use std::sync::atomic::Ordering;

use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authorized principal in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer token and adds the principal to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // A non-ASCII header value is treated the same as a malformed one
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user_id = state.auth_service.authorize(header).map_err(|e| {
        tracing::warn!(reason = e.kind(), uri = %req.uri(), "Request not authorized");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Middleware that counts requests to the static file server
pub async fn count_visits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.visits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}
