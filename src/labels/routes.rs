//! REST endpoints serving generated PDFs.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use super::pdf;
use crate::auth::StaffAuth;
use crate::auth::routes::require_staff;
use crate::store::Database;

/// Shared state for label routes.
#[derive(Clone)]
pub struct LabelRouteState {
    pub db: Arc<dyn Database>,
    pub auth: Arc<dyn StaffAuth>,
}

fn pdf_response(filename: &str, bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
}

/// GET /api/labels/stickers/{code}
async fn stickers(
    State(state): State<LabelRouteState>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    let tile = match state.db.get_tile_by_code(&code).await {
        Ok(Some(tile)) => tile,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("stickers tile lookup failed: {e}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    match pdf::sticker_sheet(&tile) {
        Ok(bytes) => Ok(pdf_response("stickers.pdf", bytes)),
        Err(e) => {
            tracing::warn!("sticker generation failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/labels/work_order/{project_id}
async fn work_order(
    State(state): State<LabelRouteState>,
    headers: HeaderMap,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    let project = match state.db.get_project(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("work_order project lookup failed: {e}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let tile = match state.db.get_tile_by_code(&project.torino_code).await {
        Ok(Some(tile)) => tile,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("work_order tile lookup failed: {e}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    match pdf::work_order(&project, &tile) {
        Ok(bytes) => Ok(pdf_response("work_order.pdf", bytes)),
        Err(e) => {
            tracing::warn!("work order generation failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Build the label routes.
pub fn label_routes(state: LabelRouteState) -> Router {
    Router::new()
        .route("/api/labels/stickers/{code}", get(stickers))
        .route("/api/labels/work_order/{project_id}", get(work_order))
        .with_state(state)
}
