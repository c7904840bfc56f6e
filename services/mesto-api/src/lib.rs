//! Mesto API
//!
//! HTTP service for sharing photo cards.
//!
//! ## Public Endpoints
//!
//! - `POST /signup` - Register an account
//! - `POST /signin` - Exchange credentials for a bearer token
//!
//! ## Authenticated Endpoints
//!
//! - `GET /users` - List profiles
//! - `GET /users/me` - Caller's profile
//! - `PATCH /users/me` - Update name and bio
//! - `PATCH /users/me/avatar` - Update avatar
//! - `GET /users/{id}` - One profile
//! - `GET /cards` - List cards, newest first
//! - `POST /cards` - Create a card
//! - `GET /cards/{id}` - One card
//! - `PATCH /cards/{id}` - Edit a card (owner only)
//! - `DELETE /cards/{id}` - Delete a card (owner only)
//! - `PUT /cards/{id}/likes` - Like a card
//! - `DELETE /cards/{id}/likes` - Remove a like
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check
//! - `GET /metrics` - Prometheus metrics (when enabled)

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;
pub mod telemetry;
pub mod validation;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware;
use axum::routing::{get, patch, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::render_timeout;
use crate::extractors::require_auth;
use crate::state::AppState;

/// Build the full HTTP router
///
/// `/metrics` is mounted only when a Prometheus handle is given.
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // Account routes (no token required)
    let public = Router::new()
        .route("/signup", post(handlers::signup))
        .route("/signin", post(handlers::signin));

    // Everything else requires a bearer token
    let protected = Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/me", get(handlers::get_me).patch(handlers::update_me))
        .route("/users/me/avatar", patch(handlers::update_avatar))
        .route("/users/{id}", get(handlers::get_user))
        .route(
            "/cards",
            get(handlers::list_cards).post(handlers::create_card),
        )
        .route(
            "/cards/{id}",
            get(handlers::get_card)
                .patch(handlers::update_card)
                .delete(handlers::delete_card),
        )
        .route(
            "/cards/{id}/likes",
            put(handlers::like_card).delete(handlers::unlike_card),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .method_not_allowed_fallback(handlers::method_not_allowed);

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let layers = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Request count and latency
        .layer(middleware::from_fn(telemetry::track_http_metrics))
        // CORS
        .layer(cors_layer(&state.config.cors_allowed_origins))
        // Timeout responses get the standard error body
        .layer(middleware::map_response(render_timeout))
        // Request timeout (innermost - closest to handler)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    // Browser hardening headers; a handler that sets its own value wins
    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .layer(layers)
        .merge(health_routes) // Health routes without timeout
        .merge(metrics_route) // Metrics route without timeout
        .layer(security_headers)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    let allow_any = allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*");
    let origins = if allow_any {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins.iter().cloned())
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
