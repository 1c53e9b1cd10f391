//! Integration: credential bootstrap, session lifecycle, TTL expiry, and
//! the gateway decision function.

use blockdeck_server::build_state;
use blockdeck_server::core::auth::gateway::{authorize, Access};
use blockdeck_server::core::config::ServerConfig;
use blockdeck_server::core::error::Error;
use tempfile::tempdir;
use tokio_test::assert_ok;

#[tokio::test]
async fn bootstrap_login_logout_cycle() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let state = build_state(ServerConfig::with_base_dir(dir.path())).await?;

    // A fresh store bootstraps the documented default pair.
    let token = assert_ok!(state.auth.login("admin", "admin").await);
    assert!(state.auth.check_auth(&token));

    state.auth.logout(&token);
    assert!(!state.auth.check_auth(&token));

    // Logout is idempotent; destroying an unknown token is not an error.
    state.auth.logout(&token);
    state.auth.logout("never-issued");
    Ok(())
}

#[tokio::test]
async fn wrong_credentials_are_rejected_without_detail() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let state = build_state(ServerConfig::with_base_dir(dir.path())).await?;

    // Wrong pass and wrong user fail identically.
    let err = state.auth.login("admin", "nope").await.unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));

    let err = state.auth.login("root", "admin").await.unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));
    Ok(())
}

#[tokio::test]
async fn sessions_expire_after_fixed_ttl() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut config = ServerConfig::with_base_dir(dir.path());
    config.session_ttl = chrono::Duration::milliseconds(50);
    let state = build_state(config).await?;

    let token = state.auth.login("admin", "admin").await?;
    assert!(state.auth.check_auth(&token));

    tokio::time::sleep(std::time::Duration::from_millis(80)).await;
    assert!(!state.auth.check_auth(&token));
    Ok(())
}

#[tokio::test]
async fn credential_update_changes_login() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let state = build_state(ServerConfig::with_base_dir(dir.path())).await?;

    state.auth.credentials().write("operator", "hunter2").await?;

    let err = state.auth.login("admin", "admin").await.unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));

    let token = state.auth.login("operator", "hunter2").await?;
    assert!(state.auth.check_auth(&token));

    let credential = state.auth.credentials().read().await?;
    assert_eq!(credential.user, "operator");
    Ok(())
}

#[tokio::test]
async fn empty_credential_pair_is_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let state = build_state(ServerConfig::with_base_dir(dir.path())).await?;

    let err = state.auth.credentials().write("", "pass").await.unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));

    let err = state.auth.credentials().write("user", "").await.unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));

    // The stored record is untouched.
    let token = state.auth.login("admin", "admin").await?;
    assert!(state.auth.check_auth(&token));
    Ok(())
}

#[tokio::test]
async fn gateway_consults_the_allow_list() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let state = build_state(ServerConfig::with_base_dir(dir.path())).await?;

    // Public routes admit with no token at all.
    assert_eq!(authorize("/api/login", None, &state.auth), Access::Admit);
    assert_eq!(authorize("/api/auth", None, &state.auth), Access::Admit);

    // Everything else rejects without a live session.
    for path in [
        "/api/pages",
        "/api/pages/1",
        "/api/user",
        "/api/upload",
        "/api/logout",
    ] {
        assert_eq!(authorize(path, None, &state.auth), Access::Reject);
        assert_eq!(authorize(path, Some("bogus"), &state.auth), Access::Reject);
    }

    let token = state.auth.login("admin", "admin").await?;
    assert_eq!(authorize("/api/pages", Some(&token), &state.auth), Access::Admit);

    state.auth.logout(&token);
    assert_eq!(authorize("/api/pages", Some(&token), &state.auth), Access::Reject);
    Ok(())
}
