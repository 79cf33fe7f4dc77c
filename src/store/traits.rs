//! Unified `Database` trait — single async interface for all persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::catalog::model::{NewTile, Tile};
use crate::clients::model::{Client, NewClient};
use crate::error::DatabaseError;
use crate::projects::model::{NewProject, Project, ProjectStatus};

/// A staff user row.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub created_at: DateTime<Utc>,
}

/// A live staff session, keyed by token hash.
#[derive(Debug, Clone)]
pub struct StaffSession {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Backend-agnostic database trait covering clients, tiles, projects,
/// and staff users/sessions.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    // ── Clients ─────────────────────────────────────────────────────

    /// Insert a new client. Returns the assigned row id.
    async fn insert_client(&self, client: &NewClient) -> Result<i64, DatabaseError>;

    /// Get a client by id.
    async fn get_client(&self, id: i64) -> Result<Option<Client>, DatabaseError>;

    /// List clients, most recent first, up to `limit`.
    async fn list_clients(&self, limit: usize) -> Result<Vec<Client>, DatabaseError>;

    // ── Tiles ───────────────────────────────────────────────────────

    /// Insert a new tile. Fails with a constraint error on a duplicate
    /// product code. Returns the assigned row id.
    async fn insert_tile(&self, tile: &NewTile) -> Result<i64, DatabaseError>;

    /// Look up a tile by its product code.
    async fn get_tile_by_code(&self, code: &str) -> Result<Option<Tile>, DatabaseError>;

    /// Page through tiles, optionally filtered by color group.
    /// Pages are 1-based.
    async fn list_tiles(
        &self,
        page: usize,
        per_page: usize,
        color_group: Option<&str>,
    ) -> Result<Vec<Tile>, DatabaseError>;

    /// Set the on-hand quantity for a tile.
    async fn update_tile_quantity(&self, code: &str, quantity: i64) -> Result<(), DatabaseError>;

    // ── Projects ────────────────────────────────────────────────────

    /// Insert a new project. Returns the assigned row id.
    async fn insert_project(&self, project: &NewProject) -> Result<i64, DatabaseError>;

    /// Get a project by id.
    async fn get_project(&self, id: i64) -> Result<Option<Project>, DatabaseError>;

    /// List projects, most recent first, optionally filtered by status.
    async fn list_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, DatabaseError>;

    /// Mark a project completed and store the completion photo.
    async fn finish_project(&self, id: i64, photo_url: &str) -> Result<(), DatabaseError>;

    // ── Users & staff sessions ──────────────────────────────────────

    /// Create or replace a staff user.
    async fn upsert_user(
        &self,
        username: &str,
        password_hash: &str,
        salt: &str,
    ) -> Result<(), DatabaseError>;

    /// Look up a staff user by username.
    async fn get_user(&self, username: &str) -> Result<Option<StoredUser>, DatabaseError>;

    /// Record a staff session under its token hash.
    async fn insert_staff_session(
        &self,
        token_hash: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError>;

    /// Look up a staff session by token hash.
    async fn get_staff_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<StaffSession>, DatabaseError>;

    /// Remove a staff session. Unknown hashes are a no-op.
    async fn delete_staff_session(&self, token_hash: &str) -> Result<(), DatabaseError>;
}
