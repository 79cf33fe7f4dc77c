//! REST endpoints for the tile inventory.
//!
//! Listing and lookup are public (the showroom browses without a login);
//! mutations require a staff session.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use super::model::NewTile;
use crate::auth::StaffAuth;
use crate::auth::routes::require_staff;
use crate::error::DatabaseError;
use crate::store::Database;

/// Shared state for catalog routes.
#[derive(Clone)]
pub struct CatalogRouteState {
    pub db: Arc<dyn Database>,
    pub auth: Arc<dyn StaffAuth>,
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_per_page")]
    per_page: usize,
    color_group: Option<String>,
}

fn default_page() -> usize {
    1
}

// The showroom grid shows 9 tiles per page.
fn default_per_page() -> usize {
    9
}

/// GET /api/tiles
async fn list_tiles(
    State(state): State<CatalogRouteState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    match state
        .db
        .list_tiles(query.page, query.per_page, query.color_group.as_deref())
        .await
    {
        Ok(tiles) => Ok(Json(tiles)),
        Err(e) => {
            tracing::warn!("list_tiles failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/tiles/{code}
async fn get_tile(
    State(state): State<CatalogRouteState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    match state.db.get_tile_by_code(&code).await {
        Ok(Some(tile)) => Ok(Json(tile)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("get_tile failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/tiles
async fn create_tile(
    State(state): State<CatalogRouteState>,
    headers: HeaderMap,
    Json(new_tile): Json<NewTile>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    if new_tile.name.trim().is_empty() || new_tile.torino_code.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    match state.db.insert_tile(&new_tile).await {
        Ok(id) => Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id })))),
        Err(DatabaseError::Constraint(_)) => Err(StatusCode::CONFLICT),
        Err(e) => {
            tracing::warn!("create_tile failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuantityRequest {
    quantity: i64,
}

/// PUT /api/tiles/{code}/quantity
async fn update_quantity(
    State(state): State<CatalogRouteState>,
    headers: HeaderMap,
    Path(code): Path<String>,
    Json(req): Json<QuantityRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    match state.db.update_tile_quantity(&code, req.quantity).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(DatabaseError::NotFound { .. }) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("update_quantity failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Build the catalog routes.
pub fn catalog_routes(state: CatalogRouteState) -> Router {
    Router::new()
        .route("/api/tiles", get(list_tiles).post(create_tile))
        .route("/api/tiles/{code}", get(get_tile))
        .route("/api/tiles/{code}/quantity", put(update_quantity))
        .with_state(state)
}
