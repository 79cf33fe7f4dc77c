//! Login/logout endpoints and the staff guard shared by protected routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::{AuthService, StaffAuth};
use crate::error::AuthError;

/// Shared state for auth routes.
#[derive(Clone)]
pub struct AuthRouteState {
    pub auth: Arc<AuthService>,
}

/// Extract the staff session token from the request headers.
pub(crate) fn session_token(headers: &HeaderMap) -> &str {
    headers
        .get("x-session-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Reject the request unless it carries a live staff session token.
pub(crate) async fn require_staff(
    auth: &dyn StaffAuth,
    headers: &HeaderMap,
) -> Result<(), StatusCode> {
    if auth.is_staff(session_token(headers)).await {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// POST /api/login
async fn login(
    State(state): State<AuthRouteState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match state.auth.login(&req.username, &req.password).await {
        Ok(token) => Json(serde_json::json!({ "token": token })).into_response(),
        Err(AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Invalid credentials" })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /api/logout
async fn logout(State(state): State<AuthRouteState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(e) = state.auth.logout(session_token(&headers)).await {
        tracing::warn!("Logout failed: {e}");
    }
    StatusCode::NO_CONTENT
}

/// Build the auth routes.
pub fn auth_routes(state: AuthRouteState) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .with_state(state)
}
