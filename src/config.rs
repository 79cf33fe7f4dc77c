//! Configuration types.

use secrecy::SecretString;

/// Top-level application configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Path to the libSQL database file.
    pub db_path: String,
    /// Bootstrap admin password (seeded on first start).
    pub admin_password: SecretString,
    /// Intake dialogue configuration.
    pub intake: IntakeConfig,
}

impl AppConfig {
    /// Build configuration from environment variables, with defaults
    /// suitable for local development.
    pub fn from_env() -> Self {
        let port = std::env::var("TORINO_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        let db_path =
            std::env::var("TORINO_DB_PATH").unwrap_or_else(|_| "./data/torino-desk.db".to_string());
        let admin_password = SecretString::from(
            std::env::var("TORINO_ADMIN_PASSWORD").unwrap_or_else(|_| "password".to_string()),
        );
        let mut intake = IntakeConfig::default();
        if let Ok(v) = std::env::var("TORINO_INTAKE_TRIGGER") {
            intake.require_trigger = matches!(v.as_str(), "1" | "true" | "yes");
        }
        Self {
            port,
            db_path,
            admin_password,
            intake,
        }
    }
}

/// Configuration for the voice client-intake dialogue.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// When true, an idle utterance must contain one of `trigger_phrases`
    /// to start a new client profile; the machine then prompts for the
    /// last name. When false, any idle utterance is captured as the last
    /// name directly.
    pub require_trigger: bool,
    /// Phrases that start the intake flow in trigger mode. Matched as
    /// case-insensitive substrings of the utterance.
    pub trigger_phrases: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            require_trigger: false,
            trigger_phrases: vec![
                "new client".to_string(),
                "client profile".to_string(),
                "add a client".to_string(),
            ],
        }
    }
}
