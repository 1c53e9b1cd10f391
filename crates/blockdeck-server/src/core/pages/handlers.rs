//! Pages handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::core::config::AppState;
use crate::core::error::Result;
use crate::core::pages::{Page, PageSummary};

#[derive(Debug, Deserialize)]
pub struct SavePageRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: Value,
}

/// GET /api/pages
pub async fn list_pages(State(state): State<AppState>) -> Result<Json<Vec<PageSummary>>> {
    let pages = state.pages.list().await?;
    Ok(Json(pages))
}

/// POST /api/pages
///
/// Always inserts a new page; a retry after an ambiguous response creates
/// a duplicate rather than overwriting.
pub async fn save_page(
    State(state): State<AppState>,
    Json(req): Json<SavePageRequest>,
) -> Result<Json<Value>> {
    info!("POST /api/pages - '{}'", req.name);

    let id = state.pages.save(&req.name, &req.content).await?;
    Ok(Json(json!({ "id": id })))
}

/// GET /api/pages/{id}
pub async fn get_page(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Page>> {
    let page = state.pages.get(id).await?;
    Ok(Json(page))
}
