//! Authentication Module
//!
//! A single shared operator credential (SQLite-backed, bootstrapped with a
//! default on first run) plus an in-memory session table keyed by opaque
//! token. Sessions do not survive a process restart.

pub mod gateway;
pub mod handlers;
pub mod middleware;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{Error, Result};

/// Documented first-run default. Weak on purpose; change it after setup.
pub const DEFAULT_USER: &str = "admin";
pub const DEFAULT_PASS: &str = "admin";

/// The single operator credential row.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: String,
    pub pass_hash: String,
}

/// Owns the one-row credential table.
pub struct CredentialStore {
    pool: SqlitePool,
}

impl CredentialStore {
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS credential (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                user TEXT NOT NULL,
                pass_hash TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Read the credential, bootstrapping the default on first run. The
    /// default is persisted before it is returned.
    pub async fn read(&self) -> Result<Credential> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT user, pass_hash FROM credential WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;

        if let Some((user, pass_hash)) = row {
            return Ok(Credential { user, pass_hash });
        }

        warn!(
            "[Auth] No credential found, bootstrapping default '{DEFAULT_USER}'/'{DEFAULT_PASS}' - change it"
        );
        let pass_hash = bcrypt::hash(DEFAULT_PASS, bcrypt::DEFAULT_COST)
            .map_err(|e| Error::Internal(e.to_string()))?;
        sqlx::query("INSERT INTO credential (id, user, pass_hash) VALUES (1, ?, ?)")
            .bind(DEFAULT_USER)
            .bind(&pass_hash)
            .execute(&self.pool)
            .await?;

        Ok(Credential {
            user: DEFAULT_USER.to_string(),
            pass_hash,
        })
    }

    /// Atomically replace the credential record.
    pub async fn write(&self, user: &str, pass: &str) -> Result<()> {
        if user.is_empty() || pass.is_empty() {
            return Err(Error::BadRequest(
                "user and pass must be non-empty".to_string(),
            ));
        }

        let pass_hash = bcrypt::hash(pass, bcrypt::DEFAULT_COST)
            .map_err(|e| Error::Internal(e.to_string()))?;
        sqlx::query(
            "INSERT INTO credential (id, user, pass_hash) VALUES (1, ?, ?)
             ON CONFLICT(id) DO UPDATE SET user = excluded.user, pass_hash = excluded.pass_hash",
        )
        .bind(user)
        .bind(&pass_hash)
        .execute(&self.pool)
        .await?;

        info!("[Auth] Credential updated for user '{user}'");
        Ok(())
    }
}

/// A live session. Expiry is fixed at creation.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues, validates, and revokes session tokens.
///
/// Sessions live only in process memory; a restart logs everyone out.
/// The lifetime is a fixed window from creation - no sliding renewal.
pub struct SessionAuthority {
    credentials: CredentialStore,
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionAuthority {
    pub fn new(credentials: CredentialStore, ttl: Duration) -> Self {
        Self {
            credentials,
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Validate the supplied pair and open a new session.
    ///
    /// There is no lockout or backoff on repeated failures.
    pub async fn login(&self, user: &str, pass: &str) -> Result<String> {
        let stored = self.credentials.read().await?;

        let pass_ok = bcrypt::verify(pass, &stored.pass_hash)
            .map_err(|e| Error::Internal(e.to_string()))?;
        if user != stored.user || !pass_ok {
            warn!("[Auth] Failed login attempt for '{user}'");
            return Err(Error::InvalidCredentials);
        }

        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        let token = session.token.clone();
        self.sessions.write().insert(token.clone(), session);

        info!("[Auth] Session opened for '{user}'");
        Ok(token)
    }

    /// Destroy a session. Destroying an unknown token is not an error.
    pub fn logout(&self, token: &str) {
        if self.sessions.write().remove(token).is_some() {
            info!("[Auth] Session closed");
        }
    }

    /// Whether the token maps to a live session. A query, not a failure
    /// path: unknown and expired tokens are simply `false`. Expired
    /// entries are removed on observation.
    pub fn check_auth(&self, token: &str) -> bool {
        let expired = {
            let sessions = self.sessions.read();
            match sessions.get(token) {
                Some(session) if session.expires_at > Utc::now() => return true,
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.sessions.write().remove(token);
        }
        false
    }
}
