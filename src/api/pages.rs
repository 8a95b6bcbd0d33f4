//! HTML page serving
//!
//! The portal ships its pages embedded in the binary. Public pages (home,
//! signup, login) are always reachable; the rest sit behind the page guard,
//! which redirects browsers without a session to /login.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;

use crate::api::middleware::{AppState, AuthenticatedUser};
use crate::models::UserRole;

/// Embedded HTML pages
#[derive(RustEmbed)]
#[folder = "pages/"]
#[include = "*.html"]
struct Pages;

fn serve_page(name: &str) -> Response {
    match Pages::get(name) {
        Some(content) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(content.data.to_vec()))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        None => {
            tracing::error!("Embedded page missing: {}", name);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Public pages, no session required
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { serve_page("index.html") }))
        .route("/signup", get(|| async { serve_page("signup.html") }))
        .route("/login", get(|| async { serve_page("login.html") }))
}

/// Pages behind the page guard (caller attaches `require_auth_page`)
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(|| async { serve_page("search.html") }))
        .route("/profile", get(|| async { serve_page("profile.html") }))
        .route("/admin", get(admin_page))
}

/// GET /admin - Dashboard, rendered per role.
///
/// Admins get the moderation dashboard, employers their posting manager.
/// Job seekers have no dashboard and land on the search page.
async fn admin_page(user: AuthenticatedUser) -> Response {
    match user.role {
        UserRole::Admin => serve_page("admin.html"),
        UserRole::Employer => serve_page("employer.html"),
        UserRole::JobSeeker => Redirect::to("/search").into_response(),
    }
}
