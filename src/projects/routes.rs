//! REST endpoints for installation projects.
//!
//! The finish endpoint is what the QR code on a work order points at: the
//! installer photographs the finished job and the project flips to
//! completed. Installers are not staff, so that endpoint takes no token.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::model::{NewProject, ProjectStatus};
use crate::auth::StaffAuth;
use crate::auth::routes::require_staff;
use crate::error::DatabaseError;
use crate::store::Database;

/// Shared state for project routes.
#[derive(Clone)]
pub struct ProjectRouteState {
    pub db: Arc<dyn Database>,
    pub auth: Arc<dyn StaffAuth>,
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<ProjectStatus>,
}

/// GET /api/projects
async fn list_projects(
    State(state): State<ProjectRouteState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    match state.db.list_projects(query.status).await {
        Ok(projects) => Ok(Json(projects)),
        Err(e) => {
            tracing::warn!("list_projects failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/projects/{id}
async fn get_project(
    State(state): State<ProjectRouteState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    match state.db.get_project(id).await {
        Ok(Some(project)) => Ok(Json(project)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("get_project failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/projects
///
/// The tile code must exist; a work order makes no sense for an unknown
/// product.
async fn create_project(
    State(state): State<ProjectRouteState>,
    headers: HeaderMap,
    Json(new_project): Json<NewProject>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    match state.db.get_tile_by_code(&new_project.torino_code).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(StatusCode::UNPROCESSABLE_ENTITY),
        Err(e) => {
            tracing::warn!("create_project tile lookup failed: {e}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
    match state.db.insert_project(&new_project).await {
        Ok(id) => Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id })))),
        Err(e) => {
            tracing::warn!("create_project failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
struct FinishRequest {
    photo_url: String,
}

/// POST /api/projects/{id}/finish
async fn finish_project(
    State(state): State<ProjectRouteState>,
    Path(id): Path<i64>,
    Json(req): Json<FinishRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.photo_url.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    match state.db.finish_project(id, &req.photo_url).await {
        Ok(()) => Ok(Json(serde_json::json!({ "success": true }))),
        Err(DatabaseError::NotFound { .. }) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("finish_project failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Build the project routes.
pub fn project_routes(state: ProjectRouteState) -> Router {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/{id}", get(get_project))
        .route("/api/projects/{id}/finish", post(finish_project))
        .with_state(state)
}
