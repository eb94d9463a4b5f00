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
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::generate_product_key::generate_product_key;
use super::handlers::me::me;
use super::handlers::signin::signin;
use super::handlers::signup::signup;
use super::middleware::authorize;
use super::middleware::GuardState;
use super::middleware::RoleRequirement;
use crate::domain::user::models::UserRole;
use crate::domain::user::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    product_key_requires_admin: bool,
) -> Router {
    let state = AppState {
        auth_service: auth_service.clone(),
    };

    let guard = |required: RoleRequirement| GuardState {
        auth_service: auth_service.clone(),
        required,
    };

    let public_routes = Router::new()
        .route("/api/auth/signup/:role", post(signup))
        .route("/api/auth/signin", post(signin));

    let session_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            guard(RoleRequirement::authenticated()),
            authorize,
        ));

    let key_routes = Router::new().route("/api/auth/key", post(generate_product_key));
    let key_routes = if product_key_requires_admin {
        key_routes.route_layer(middleware::from_fn_with_state(
            guard(RoleRequirement::any_of(&[UserRole::Admin])),
            authorize,
        ))
    } else {
        tracing::warn!("Product key generation is not role-gated");
        key_routes
    };

    // Headers are left out of the span so bearer tokens never reach the log
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
        .merge(session_routes)
        .merge(key_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
