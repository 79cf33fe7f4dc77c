//! Staff authentication — password login and token-backed staff sessions.
//!
//! Passwords are stored as salted, iterated SHA-256 digests. Session
//! tokens are random and only their hash is stored, so a leaked database
//! does not yield usable tokens.

pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::AuthError;
use crate::store::Database;

pub use routes::{AuthRouteState, auth_routes};

/// Staff session lifetime: 12 hours.
const SESSION_TTL_HOURS: i64 = 12;

/// Salt byte length for password hashing.
const SALT_BYTES: usize = 16;

/// Number of SHA-256 iterations for password stretching.
const HASH_ITERATIONS: u32 = 100_000;

/// The boundary the intake dialogue checks before processing an utterance.
#[async_trait]
pub trait StaffAuth: Send + Sync {
    /// Whether the given session token belongs to a live staff session.
    async fn is_staff(&self, session_token: &str) -> bool;
}

fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut digest = Sha256::digest(format!("{salt}:{password}").as_bytes());
    for _ in 1..HASH_ITERATIONS {
        digest = Sha256::digest(digest);
    }
    hex::encode(digest)
}

fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Store-backed authentication service.
pub struct AuthService {
    db: Arc<dyn Database>,
}

impl AuthService {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Ensure the bootstrap admin user exists. Existing users keep their
    /// password.
    pub async fn seed_admin(&self, password: &SecretString) -> Result<(), AuthError> {
        if self.db.get_user("admin").await?.is_some() {
            return Ok(());
        }
        let salt = generate_salt();
        let hash = hash_password(password.expose_secret(), &salt);
        self.db.upsert_user("admin", &hash, &salt).await?;
        tracing::info!("Seeded admin user");
        Ok(())
    }

    /// Register a new staff user.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let trimmed = username.trim();
        if trimmed.is_empty() || trimmed.len() > 64 {
            return Err(AuthError::InvalidUsername(trimmed.to_string()));
        }
        let salt = generate_salt();
        let hash = hash_password(password, &salt);
        self.db.upsert_user(trimmed, &hash, &salt).await?;
        Ok(())
    }

    /// Verify credentials and mint a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .db
            .get_user(username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if hash_password(password, &user.salt) != user.password_hash {
            return Err(AuthError::InvalidCredentials);
        }

        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
        self.db
            .insert_staff_session(&hash_token(&token), &user.username, expires_at)
            .await?;
        tracing::info!(username = %user.username, "Staff login");
        Ok(token)
    }

    /// Invalidate a session token. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.db.delete_staff_session(&hash_token(token)).await?;
        Ok(())
    }
}

#[async_trait]
impl StaffAuth for AuthService {
    async fn is_staff(&self, session_token: &str) -> bool {
        if session_token.is_empty() {
            return false;
        }
        match self.db.get_staff_session(&hash_token(session_token)).await {
            Ok(Some(session)) => session.expires_at > Utc::now(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Staff session lookup failed: {e}");
                false
            }
        }
    }
}
