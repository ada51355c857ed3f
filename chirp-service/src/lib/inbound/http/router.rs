use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::metrics;
use super::handlers::admin::reset;
use super::handlers::create_chirp::create_chirp;
use super::handlers::create_user::create_user;
use super::handlers::get_chirp::get_chirp;
use super::handlers::get_chirps::get_chirps;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::validate_chirp::validate_chirp;
use super::middleware::authenticate as auth_middleware;
use super::middleware::count_visits;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub chirp_service: Arc<dyn ChirpServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    /// Requests served under `/app` since start or last reset
    pub visits: Arc<AtomicU64>,
    pub platform: String,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServicePort>,
        chirp_service: Arc<dyn ChirpServicePort>,
        auth_service: Arc<dyn AuthServicePort>,
        platform: String,
    ) -> Self {
        Self {
            user_service,
            chirp_service,
            auth_service,
            visits: Arc::new(AtomicU64::new(0)),
            platform,
        }
    }
}

pub fn create_router(state: AppState, static_dir: &str) -> Router {
    let public_routes = Router::new()
        .route("/api/healthz", get(health))
        .route("/api/login", post(login))
        .route("/api/users", post(create_user))
        .route("/api/chirps", get(get_chirps))
        .route("/api/chirps/:chirp_id", get(get_chirp))
        .route("/api/validate_chirp", post(validate_chirp))
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset));

    let protected_routes = Router::new()
        .route("/api/chirps", post(create_chirp))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let file_server = Router::new()
        .nest_service("/app", ServeDir::new(static_dir))
        .route_layer(middleware::from_fn_with_state(state.clone(), count_visits));

    // Authorization carries bearer tokens, so headers stay out of the span
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(file_server)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
