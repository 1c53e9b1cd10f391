//! Blockdeck Server Library
//!
//! Backend for a block-based page builder: a closed block model, an
//! append-only page store, a single shared operator credential, and an
//! access gateway in front of the whole /api surface.

pub mod core;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::auth::{CredentialStore, SessionAuthority};
use crate::core::config::{AppState, ServerConfig};
use crate::core::pages::PageStore;
use crate::core::router::router;
use crate::core::uploads::DiskAssets;

/// Build the shared application state from a config.
pub async fn build_state(config: ServerConfig) -> anyhow::Result<AppState> {
    config.ensure_dirs().await?;

    let pool = store::connect(&config.data_dir).await?;

    let pages = Arc::new(PageStore::new(pool.clone()).await?);
    let credentials = CredentialStore::new(pool).await?;
    let auth = Arc::new(SessionAuthority::new(credentials, config.session_ttl));
    let assets = Arc::new(DiskAssets::new(config.uploads_dir.clone()));

    Ok(AppState {
        config,
        pages,
        auth,
        assets,
    })
}

pub async fn run() -> anyhow::Result<()> {
    info!("=== Blockdeck Server ===");

    let root = blockdeck_common::init_structure()?;
    info!("Storage root: {:?}", root);

    let config = ServerConfig::default();
    let port = config.port;
    let state = build_state(config).await?;

    // Surface the default-credential warning at startup, not on first login.
    match state.auth.credentials().read().await {
        Ok(credential) => info!("Operator user: '{}'", credential.user),
        Err(e) => warn!("Credential bootstrap failed: {e}"),
    }

    let app = router(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
