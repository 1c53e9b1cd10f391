//! Auth handlers

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use http::header::SET_COOKIE;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::core::auth::middleware::{extract_token, SESSION_COOKIE};
use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::Result;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCredentialRequest {
    pub user: String,
    pub pass: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response> {
    info!("POST /api/login - '{}'", req.user);

    let token = state.auth.login(&req.user, &req.pass).await?;

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    Ok(([(SET_COOKIE, cookie)], Json(json!({ "ok": true }))).into_response())
}

/// POST /api/logout
pub async fn logout(State(state): State<AppState>, ctx: Ctx) -> Result<Response> {
    info!("POST /api/logout");

    state.auth.logout(ctx.token());

    // Expire the cookie on the client as well.
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    Ok(([(SET_COOKIE, cookie)], Json(json!({ "ok": true }))).into_response())
}

/// GET /api/auth
///
/// A query, not a failure path: an unknown or expired token simply reports
/// unauthenticated.
pub async fn auth_check(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let authenticated = extract_token(&headers)
        .map(|token| state.auth.check_auth(&token))
        .unwrap_or(false);

    Json(json!({ "authenticated": authenticated }))
}

/// GET /api/user
pub async fn get_credential(State(state): State<AppState>) -> Result<Json<Value>> {
    let credential = state.auth.credentials().read().await?;
    Ok(Json(json!({ "user": credential.user })))
}

/// POST /api/user
pub async fn update_credential(
    State(state): State<AppState>,
    Json(req): Json<UpdateCredentialRequest>,
) -> Result<Json<Value>> {
    info!("POST /api/user - '{}'", req.user);

    state.auth.credentials().write(&req.user, &req.pass).await?;
    Ok(Json(json!({ "ok": true })))
}
