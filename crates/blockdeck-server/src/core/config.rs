//! Server configuration and shared state

use chrono::Duration;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::auth::SessionAuthority;
use crate::core::pages::PageStore;
use crate::core::uploads::DiskAssets;

/// Configuration for the blockdeck server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// SQLite database directory
    pub data_dir: PathBuf,
    /// Uploaded asset directory
    pub uploads_dir: PathBuf,
    /// Fixed session lifetime, measured from login
    pub session_ttl: Duration,
    /// Listen port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: blockdeck_common::data_dir(),
            uploads_dir: blockdeck_common::uploads_dir(),
            session_ttl: Duration::hours(24),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl ServerConfig {
    /// Create config rooted at a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base = base_dir.into();
        Self {
            data_dir: base.join("data"),
            uploads_dir: base.join("uploads"),
            ..Self::default()
        }
    }

    /// Ensure all directories exist
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        Ok(())
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub pages: Arc<PageStore>,
    pub auth: Arc<SessionAuthority>,
    pub assets: Arc<DiskAssets>,
}
