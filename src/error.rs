//! Error types for Torino Desk.

/// Top-level error type for the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Label error: {0}")]
    Label(#[from] LabelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired or unknown")]
    SessionInvalid,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Label (PDF/QR) generation errors.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Unknown product code: {0}")]
    UnknownCode(String),

    #[error("Unknown project: {0}")]
    UnknownProject(i64),

    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, Error>;
