//! Client records — model, repository, and REST routes.

pub mod model;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DatabaseError;
use crate::store::Database;

pub use model::{Client, NewClient};
pub use routes::{ClientRouteState, client_routes};

/// Creation interface the intake dialogue commits through.
///
/// Kept narrow so the dialogue core can be tested against a stub and
/// never learns about the rest of the persistence surface.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Create a client record, returning its identifier.
    async fn create(&self, client: NewClient) -> Result<i64, DatabaseError>;
}

/// Store-backed client access.
pub struct ClientStore {
    db: Arc<dyn Database>,
}

impl ClientStore {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Client>, DatabaseError> {
        self.db.get_client(id).await
    }

    pub async fn list(&self, limit: usize) -> Result<Vec<Client>, DatabaseError> {
        self.db.list_clients(limit).await
    }
}

#[async_trait]
impl ClientRepository for ClientStore {
    async fn create(&self, client: NewClient) -> Result<i64, DatabaseError> {
        let id = self.db.insert_client(&client).await?;
        tracing::debug!(id, name = %client.name, "Client created");
        Ok(id)
    }
}
