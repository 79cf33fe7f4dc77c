//! Installation project records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of an installation project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Scheduled,
    Completed,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// A tile installation job for a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    /// Product code of the tile being installed.
    pub torino_code: String,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub address: Option<String>,
    pub sq_ft: Option<f64>,
    pub install_date: Option<String>,
    pub installer_fee: Option<Decimal>,
    pub budget: Option<Decimal>,
    pub schedule: Option<String>,
    pub status: ProjectStatus,
    /// Completion photo, set when the installer finishes the job.
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A project about to be created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub torino_code: String,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sq_ft: Option<f64>,
    #[serde(default)]
    pub install_date: Option<String>,
    #[serde(default)]
    pub installer_fee: Option<Decimal>,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
