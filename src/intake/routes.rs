//! HTTP adapter for the intake dialogue.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::prompts::IntakeReply;
use super::service::IntakeService;
use crate::auth::routes::session_token;

/// Shared state for intake routes.
#[derive(Clone)]
pub struct IntakeRouteState {
    pub service: Arc<IntakeService>,
}

#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    pub text: String,
}

/// POST /api/voice
///
/// One transcribed utterance in, one structured reply out. Always 200:
/// failures are carried in the `success` flag, never as HTTP errors.
async fn process_voice(
    State(state): State<IntakeRouteState>,
    headers: HeaderMap,
    Json(req): Json<VoiceRequest>,
) -> Json<IntakeReply> {
    let token = session_token(&headers);
    Json(state.service.handle_utterance(token, &req.text).await)
}

/// Build the intake routes.
pub fn intake_routes(state: IntakeRouteState) -> Router {
    Router::new()
        .route("/api/voice", post(process_voice))
        .with_state(state)
}
