//! Client records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer of the showroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Store-assigned identifier.
    pub id: i64,
    /// Full display name ("First Last").
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A client record about to be created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}
