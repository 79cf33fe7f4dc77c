//! libSQL backend — async `Database` trait implementation.
//!
//! Supports local file and in-memory databases. Money columns are stored
//! as decimal strings; timestamps as RFC 3339.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::catalog::model::{NewTile, Tile};
use crate::clients::model::{Client, NewClient};
use crate::error::DatabaseError;
use crate::projects::model::{NewProject, Project, ProjectStatus};
use crate::store::migrations;
use crate::store::traits::{Database, StaffSession, StoredUser};

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Connection(format!("Failed to open database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Connection(format!("Failed to create in-memory database: {e}"))
            })?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Convert `Option<&str>` to a libsql Value.
fn opt_text(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

/// Serialize an optional Decimal as a nullable TEXT value.
fn opt_decimal(d: Option<Decimal>) -> libsql::Value {
    match d {
        Some(d) => libsql::Value::Text(d.to_string()),
        None => libsql::Value::Null,
    }
}

fn status_to_str(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Scheduled => "scheduled",
        ProjectStatus::Completed => "completed",
    }
}

fn str_to_status(s: &str) -> ProjectStatus {
    match s {
        "completed" => ProjectStatus::Completed,
        _ => ProjectStatus::Scheduled,
    }
}

/// Map a query or execute error, flagging UNIQUE/constraint failures.
fn query_err(context: &str, e: libsql::Error) -> DatabaseError {
    let text = e.to_string();
    if text.contains("UNIQUE") || text.contains("constraint") {
        DatabaseError::Constraint(format!("{context}: {text}"))
    } else {
        DatabaseError::Query(format!("{context}: {text}"))
    }
}

fn row_to_client(row: &libsql::Row) -> Result<Client, libsql::Error> {
    let created_str: String = row.get(6)?;
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2).ok(),
        phone: row.get(3).ok(),
        email: row.get(4).ok(),
        notes: row.get(5).ok(),
        created_at: parse_datetime(&created_str),
    })
}

fn row_to_tile(row: &libsql::Row) -> Result<Tile, libsql::Error> {
    let price_str: String = row.get(2)?;
    let created_str: String = row.get(12)?;
    Ok(Tile {
        id: row.get(0)?,
        name: row.get(1)?,
        price: price_str.parse().unwrap_or_default(),
        description: row.get(3).ok(),
        supplier: row.get(4)?,
        sqft_per_box: row.get(5)?,
        style: row.get(6)?,
        size: row.get(7)?,
        torino_code: row.get(8)?,
        quantity: row.get(9)?,
        color_group: row.get(10)?,
        image: row.get(11).ok(),
        created_at: parse_datetime(&created_str),
    })
}

fn row_to_project(row: &libsql::Row) -> Result<Project, libsql::Error> {
    let status_str: String = row.get(10)?;
    let created_str: String = row.get(13)?;
    Ok(Project {
        id: row.get(0)?,
        torino_code: row.get(1)?,
        client_id: row.get(2).ok(),
        client_name: row.get(3).ok(),
        address: row.get(4).ok(),
        sq_ft: row.get(5).ok(),
        install_date: row.get(6).ok(),
        installer_fee: row
            .get::<String>(7)
            .ok()
            .and_then(|s| s.parse().ok()),
        budget: row.get::<String>(8).ok().and_then(|s| s.parse().ok()),
        schedule: row.get(9).ok(),
        status: str_to_status(&status_str),
        photo_url: row.get(11).ok(),
        notes: row.get(12).ok(),
        created_at: parse_datetime(&created_str),
    })
}

// ── Trait implementation ────────────────────────────────────────────

const CLIENT_COLUMNS: &str = "id, name, address, phone, email, notes, created_at";

const TILE_COLUMNS: &str = "id, name, price, description, supplier, sqft_per_box, style, size, \
                            torino_code, quantity, color_group, image, created_at";

const PROJECT_COLUMNS: &str = "id, torino_code, client_id, client_name, address, sq_ft, \
                               install_date, installer_fee, budget, schedule, status, photo_url, \
                               notes, created_at";

#[async_trait]
impl Database for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    // ── Clients ─────────────────────────────────────────────────────

    async fn insert_client(&self, client: &NewClient) -> Result<i64, DatabaseError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO clients (name, address, phone, email, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                client.name.as_str(),
                opt_text(client.address.as_deref()),
                opt_text(client.phone.as_deref()),
                opt_text(client.email.as_deref()),
                opt_text(client.notes.as_deref()),
                Utc::now().to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| query_err("insert_client", e))?;

        let id = conn.last_insert_rowid();
        debug!(id, "Client inserted into DB");
        Ok(id)
    }

    async fn get_client(&self, id: i64) -> Result<Option<Client>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"),
                params![id],
            )
            .await
            .map_err(|e| query_err("get_client", e))?;
        match rows.next().await {
            Ok(Some(row)) => Ok(Some(
                row_to_client(&row).map_err(|e| query_err("get_client row", e))?,
            )),
            Ok(None) => Ok(None),
            Err(e) => Err(query_err("get_client", e)),
        }
    }

    async fn list_clients(&self, limit: usize) -> Result<Vec<Client>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id DESC LIMIT ?1"),
                params![limit as i64],
            )
            .await
            .map_err(|e| query_err("list_clients", e))?;

        let mut clients = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| query_err("list_clients", e))?
        {
            clients.push(row_to_client(&row).map_err(|e| query_err("list_clients row", e))?);
        }
        Ok(clients)
    }

    // ── Tiles ───────────────────────────────────────────────────────

    async fn insert_tile(&self, tile: &NewTile) -> Result<i64, DatabaseError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO tiles (name, price, description, supplier, sqft_per_box, style, size,
                torino_code, quantity, color_group, image, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                tile.name.as_str(),
                tile.price.to_string(),
                opt_text(tile.description.as_deref()),
                tile.supplier.as_str(),
                tile.sqft_per_box,
                tile.style.as_str(),
                tile.size.as_str(),
                tile.torino_code.as_str(),
                tile.quantity,
                tile.color_group.as_str(),
                opt_text(tile.image.as_deref()),
                Utc::now().to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| query_err("insert_tile", e))?;

        let id = conn.last_insert_rowid();
        debug!(id, code = %tile.torino_code, "Tile inserted into DB");
        Ok(id)
    }

    async fn get_tile_by_code(&self, code: &str) -> Result<Option<Tile>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {TILE_COLUMNS} FROM tiles WHERE torino_code = ?1"),
                params![code],
            )
            .await
            .map_err(|e| query_err("get_tile_by_code", e))?;
        match rows.next().await {
            Ok(Some(row)) => Ok(Some(
                row_to_tile(&row).map_err(|e| query_err("get_tile_by_code row", e))?,
            )),
            Ok(None) => Ok(None),
            Err(e) => Err(query_err("get_tile_by_code", e)),
        }
    }

    async fn list_tiles(
        &self,
        page: usize,
        per_page: usize,
        color_group: Option<&str>,
    ) -> Result<Vec<Tile>, DatabaseError> {
        let offset = page.saturating_sub(1) * per_page;
        let mut rows = match color_group {
            Some(group) => self
                .conn()
                .query(
                    &format!(
                        "SELECT {TILE_COLUMNS} FROM tiles WHERE color_group = ?1
                         ORDER BY name LIMIT ?2 OFFSET ?3"
                    ),
                    params![group, per_page as i64, offset as i64],
                )
                .await
                .map_err(|e| query_err("list_tiles", e))?,
            None => self
                .conn()
                .query(
                    &format!("SELECT {TILE_COLUMNS} FROM tiles ORDER BY name LIMIT ?1 OFFSET ?2"),
                    params![per_page as i64, offset as i64],
                )
                .await
                .map_err(|e| query_err("list_tiles", e))?,
        };

        let mut tiles = Vec::new();
        while let Some(row) = rows.next().await.map_err(|e| query_err("list_tiles", e))? {
            tiles.push(row_to_tile(&row).map_err(|e| query_err("list_tiles row", e))?);
        }
        Ok(tiles)
    }

    async fn update_tile_quantity(&self, code: &str, quantity: i64) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "UPDATE tiles SET quantity = ?1 WHERE torino_code = ?2",
                params![quantity, code],
            )
            .await
            .map_err(|e| query_err("update_tile_quantity", e))?;
        if affected == 0 {
            return Err(DatabaseError::NotFound {
                entity: "tile".to_string(),
                id: code.to_string(),
            });
        }
        Ok(())
    }

    // ── Projects ────────────────────────────────────────────────────

    async fn insert_project(&self, project: &NewProject) -> Result<i64, DatabaseError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO projects (torino_code, client_id, client_name, address, sq_ft,
                install_date, installer_fee, budget, schedule, status, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                project.torino_code.as_str(),
                project.client_id,
                opt_text(project.client_name.as_deref()),
                opt_text(project.address.as_deref()),
                project.sq_ft,
                opt_text(project.install_date.as_deref()),
                opt_decimal(project.installer_fee),
                opt_decimal(project.budget),
                opt_text(project.schedule.as_deref()),
                status_to_str(ProjectStatus::Scheduled),
                opt_text(project.notes.as_deref()),
                Utc::now().to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| query_err("insert_project", e))?;

        let id = conn.last_insert_rowid();
        debug!(id, code = %project.torino_code, "Project inserted into DB");
        Ok(id)
    }

    async fn get_project(&self, id: i64) -> Result<Option<Project>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                params![id],
            )
            .await
            .map_err(|e| query_err("get_project", e))?;
        match rows.next().await {
            Ok(Some(row)) => Ok(Some(
                row_to_project(&row).map_err(|e| query_err("get_project row", e))?,
            )),
            Ok(None) => Ok(None),
            Err(e) => Err(query_err("get_project", e)),
        }
    }

    async fn list_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = match status {
            Some(status) => self
                .conn()
                .query(
                    &format!(
                        "SELECT {PROJECT_COLUMNS} FROM projects WHERE status = ?1
                         ORDER BY id DESC"
                    ),
                    params![status_to_str(status)],
                )
                .await
                .map_err(|e| query_err("list_projects", e))?,
            None => self
                .conn()
                .query(
                    &format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id DESC"),
                    (),
                )
                .await
                .map_err(|e| query_err("list_projects", e))?,
        };

        let mut projects = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| query_err("list_projects", e))?
        {
            projects.push(row_to_project(&row).map_err(|e| query_err("list_projects row", e))?);
        }
        Ok(projects)
    }

    async fn finish_project(&self, id: i64, photo_url: &str) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "UPDATE projects SET status = ?1, photo_url = ?2 WHERE id = ?3",
                params![status_to_str(ProjectStatus::Completed), photo_url, id],
            )
            .await
            .map_err(|e| query_err("finish_project", e))?;
        if affected == 0 {
            return Err(DatabaseError::NotFound {
                entity: "project".to_string(),
                id: id.to_string(),
            });
        }
        debug!(id, "Project finished");
        Ok(())
    }

    // ── Users & staff sessions ──────────────────────────────────────

    async fn upsert_user(
        &self,
        username: &str,
        password_hash: &str,
        salt: &str,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO users (username, password_hash, salt, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(username) DO UPDATE SET password_hash = ?2, salt = ?3",
                params![username, password_hash, salt, Utc::now().to_rfc3339()],
            )
            .await
            .map_err(|e| query_err("upsert_user", e))?;
        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<Option<StoredUser>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT username, password_hash, salt, created_at FROM users WHERE username = ?1",
                params![username],
            )
            .await
            .map_err(|e| query_err("get_user", e))?;
        match rows.next().await {
            Ok(Some(row)) => {
                let created_str: String = row.get(3).map_err(|e| query_err("get_user row", e))?;
                Ok(Some(StoredUser {
                    username: row.get(0).map_err(|e| query_err("get_user row", e))?,
                    password_hash: row.get(1).map_err(|e| query_err("get_user row", e))?,
                    salt: row.get(2).map_err(|e| query_err("get_user row", e))?,
                    created_at: parse_datetime(&created_str),
                }))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(query_err("get_user", e)),
        }
    }

    async fn insert_staff_session(
        &self,
        token_hash: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO staff_sessions (token_hash, username, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    token_hash,
                    username,
                    Utc::now().to_rfc3339(),
                    expires_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| query_err("insert_staff_session", e))?;
        Ok(())
    }

    async fn get_staff_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<StaffSession>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT username, expires_at FROM staff_sessions WHERE token_hash = ?1",
                params![token_hash],
            )
            .await
            .map_err(|e| query_err("get_staff_session", e))?;
        match rows.next().await {
            Ok(Some(row)) => {
                let expires_str: String =
                    row.get(1).map_err(|e| query_err("get_staff_session row", e))?;
                Ok(Some(StaffSession {
                    username: row.get(0).map_err(|e| query_err("get_staff_session row", e))?,
                    expires_at: parse_datetime(&expires_str),
                }))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(query_err("get_staff_session", e)),
        }
    }

    async fn delete_staff_session(&self, token_hash: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "DELETE FROM staff_sessions WHERE token_hash = ?1",
                params![token_hash],
            )
            .await
            .map_err(|e| query_err("delete_staff_session", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_tile(code: &str) -> NewTile {
        NewTile {
            name: "Calacatta Gloss".to_string(),
            price: dec!(4.25),
            description: Some("Polished marble look".to_string()),
            supplier: "Daltile".to_string(),
            sqft_per_box: 10.5,
            style: "Marble Look".to_string(),
            size: "12x24".to_string(),
            torino_code: code.to_string(),
            quantity: 12,
            color_group: "White".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn client_insert_and_get_roundtrip() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        let id = db
            .insert_client(&NewClient {
                name: "John Smith".to_string(),
                address: Some("123 Main St".to_string()),
                phone: Some("555-123-4567".to_string()),
                email: Some("john@example.com".to_string()),
                notes: None,
            })
            .await
            .unwrap();
        assert!(id > 0);

        let client = db.get_client(id).await.unwrap().unwrap();
        assert_eq!(client.name, "John Smith");
        assert_eq!(client.phone.as_deref(), Some("555-123-4567"));
        assert!(client.notes.is_none());

        assert!(db.get_client(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tile_code_is_unique() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        db.insert_tile(&sample_tile("VET-1201")).await.unwrap();
        let err = db.insert_tile(&sample_tile("VET-1201")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Constraint(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn tile_price_roundtrips_as_decimal() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        db.insert_tile(&sample_tile("VET-1201")).await.unwrap();
        let tile = db.get_tile_by_code("VET-1201").await.unwrap().unwrap();
        assert_eq!(tile.price, dec!(4.25));
        assert_eq!(tile.quantity, 12);
    }

    #[tokio::test]
    async fn list_tiles_filters_and_paginates() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        for i in 0..5 {
            let mut tile = sample_tile(&format!("VET-{i}"));
            tile.color_group = if i < 3 { "White" } else { "Grey" }.to_string();
            db.insert_tile(&tile).await.unwrap();
        }

        let white = db.list_tiles(1, 10, Some("White")).await.unwrap();
        assert_eq!(white.len(), 3);

        let page1 = db.list_tiles(1, 2, None).await.unwrap();
        let page2 = db.list_tiles(2, 2, None).await.unwrap();
        assert_eq!(page1.len(), 2);
        assert_eq!(page2.len(), 2);
        assert_ne!(page1[0].torino_code, page2[0].torino_code);
    }

    #[tokio::test]
    async fn update_quantity_requires_known_code() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        db.insert_tile(&sample_tile("VET-1201")).await.unwrap();

        db.update_tile_quantity("VET-1201", 3).await.unwrap();
        let tile = db.get_tile_by_code("VET-1201").await.unwrap().unwrap();
        assert_eq!(tile.quantity, 3);

        let err = db.update_tile_quantity("NOPE", 3).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn project_lifecycle() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        db.insert_tile(&sample_tile("VET-1201")).await.unwrap();

        let id = db
            .insert_project(&NewProject {
                torino_code: "VET-1201".to_string(),
                client_id: None,
                client_name: Some("John Smith".to_string()),
                address: Some("123 Main St".to_string()),
                sq_ft: Some(240.0),
                install_date: Some("2026-09-01".to_string()),
                installer_fee: Some(dec!(850.00)),
                budget: Some(dec!(4000)),
                schedule: None,
                notes: None,
            })
            .await
            .unwrap();

        let project = db.get_project(id).await.unwrap().unwrap();
        assert_eq!(project.status, ProjectStatus::Scheduled);
        assert_eq!(project.installer_fee, Some(dec!(850.00)));
        assert!(project.photo_url.is_none());

        db.finish_project(id, "https://photos/job-1.jpg").await.unwrap();
        let project = db.get_project(id).await.unwrap().unwrap();
        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.photo_url.as_deref(), Some("https://photos/job-1.jpg"));

        let open = db.list_projects(Some(ProjectStatus::Scheduled)).await.unwrap();
        assert!(open.is_empty());
        let done = db.list_projects(Some(ProjectStatus::Completed)).await.unwrap();
        assert_eq!(done.len(), 1);
    }

    #[tokio::test]
    async fn user_and_staff_session_roundtrip() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        db.upsert_user("admin", "hash", "salt").await.unwrap();
        let user = db.get_user("admin").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "hash");

        // Upsert replaces the password.
        db.upsert_user("admin", "hash2", "salt2").await.unwrap();
        let user = db.get_user("admin").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "hash2");

        let expires = Utc::now() + chrono::Duration::hours(1);
        db.insert_staff_session("tok", "admin", expires).await.unwrap();
        let session = db.get_staff_session("tok").await.unwrap().unwrap();
        assert_eq!(session.username, "admin");

        db.delete_staff_session("tok").await.unwrap();
        assert!(db.get_staff_session("tok").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn migrations_are_idempotent_on_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("torino.db");
        {
            let db = LibSqlBackend::new_local(&path).await.unwrap();
            db.insert_client(&NewClient {
                name: "Jane Doe".to_string(),
                address: None,
                phone: None,
                email: None,
                notes: None,
            })
            .await
            .unwrap();
        }
        // Reopening runs migrations again; data survives.
        let db = LibSqlBackend::new_local(&path).await.unwrap();
        let clients = db.list_clients(10).await.unwrap();
        assert_eq!(clients.len(), 1);
    }
}
