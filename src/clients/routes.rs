//! REST endpoints for client records.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::{ClientRepository, ClientStore, NewClient};
use crate::auth::StaffAuth;
use crate::auth::routes::require_staff;

/// Shared state for client routes.
#[derive(Clone)]
pub struct ClientRouteState {
    pub store: Arc<ClientStore>,
    pub auth: Arc<dyn StaffAuth>,
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    50
}

/// GET /api/clients
async fn list_clients(
    State(state): State<ClientRouteState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    match state.store.list(query.limit).await {
        Ok(clients) => Ok(Json(clients)),
        Err(e) => {
            tracing::warn!("list_clients failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/clients/{id}
async fn get_client(
    State(state): State<ClientRouteState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    match state.store.get(id).await {
        Ok(Some(client)) => Ok(Json(client)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("get_client failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/clients
async fn create_client(
    State(state): State<ClientRouteState>,
    headers: HeaderMap,
    Json(new_client): Json<NewClient>,
) -> Result<impl IntoResponse, StatusCode> {
    require_staff(state.auth.as_ref(), &headers).await?;
    if new_client.name.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    match state.store.create(new_client).await {
        Ok(id) => Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id })))),
        Err(e) => {
            tracing::warn!("create_client failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Build the client routes.
pub fn client_routes(state: ClientRouteState) -> Router {
    Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route("/api/clients/{id}", get(get_client))
        .with_state(state)
}
