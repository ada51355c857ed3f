use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let visits = state.visits.load(Ordering::SeqCst);

    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    \
         <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>",
        visits
    ))
}

/// Clear the visit counter and every user; only allowed on the dev platform.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if state.platform != "dev" {
        tracing::warn!(platform = %state.platform, "Reset refused outside dev platform");
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    state.visits.store(0, Ordering::SeqCst);
    let deleted = state.user_service.reset_users().await?;
    tracing::info!(deleted, "Visit counter and users reset");

    Ok(StatusCode::OK)
}
