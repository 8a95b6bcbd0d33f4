//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints for the portal:
//! - Auth endpoints (signup, login)
//! - Job posting endpoints (CRUD + search)
//! - Embedded HTML pages
//!
//! Two flavors of access gate guard the protected surface: JSON endpoints
//! return a 401 error body, pages redirect to the login form.

pub mod auth;
pub mod jobs;
pub mod middleware;
pub mod pages;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    // CORS configuration, credentials allowed for cookie auth
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    // JSON endpoints behind the api guard (401 on failure)
    let api_routes = Router::new()
        .nest("/api/jobs", jobs::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Pages behind the page guard (redirect to /login on failure)
    let guarded_pages = pages::protected_router().route_layer(
        axum_middleware::from_fn_with_state(state.clone(), middleware::require_auth_page),
    );

    Ok(Router::new()
        .merge(pages::public_router())
        .merge(guarded_pages)
        .merge(auth::router())
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
