//! Authentication API endpoints
//!
//! Handles HTTP requests for accounts:
//! - POST /signup - Account registration
//! - POST /login - Login, returns a session token
//!
//! Login sets the token as an HttpOnly cookie for browser clients and also
//! returns it in the body for programmatic ones. There is no logout
//! endpoint: tokens are stateless, clients just drop the cookie.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::middleware::{ApiError, AppState};
use crate::models::UserRole;
use crate::services::user::UserServiceError;

/// Request body for signup.
///
/// The role arrives as a plain string so an unknown value produces our own
/// validation error instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "userType")]
    pub user_type: String,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for successful signup
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

/// Response for successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userType")]
    pub user_type: String,
}

/// Build the auth router (all routes public)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// POST /signup - Account registration
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let role = UserRole::from_str(&body.user_type)
        .map_err(|_| ApiError::validation_error(format!("Invalid user type: {}", body.user_type)))?;

    state
        .user_service
        .signup(&body.username, &body.password, role)
        .await
        .map_err(|e| match e {
            UserServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            UserServiceError::UsernameTaken(_) => ApiError::conflict("Username already taken"),
            other => {
                tracing::error!("Signup failed: {}", other);
                ApiError::internal_error("Signup failed")
            }
        })?;

    Ok(Json(SignupResponse {
        message: "Signup successful".to_string(),
    }))
}

/// POST /login - Login
///
/// Bad username and bad password produce byte-identical 401 responses.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .user_service
        .login(&body.username, &body.password)
        .await
        .map_err(|e| match e {
            UserServiceError::InvalidCredentials => {
                ApiError::unauthorized("Invalid username or password")
            }
            other => {
                tracing::error!("Login failed: {}", other);
                ApiError::internal_error("Login failed")
            }
        })?;

    // Session cookie for browser clients
    let cookie = format!(
        "token={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        outcome.token, outcome.expires_in
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::internal_error(format!("Invalid cookie value: {}", e)))?,
    );

    Ok((
        headers,
        Json(LoginResponse {
            token: outcome.token,
            user_type: outcome.role.to_string(),
        }),
    ))
}
