//! Persistence layer — libSQL-backed storage for clients, tiles,
//! projects, and staff users.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use traits::{Database, StaffSession, StoredUser};
