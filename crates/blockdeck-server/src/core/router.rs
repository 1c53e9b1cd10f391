//! Router
//!
//! Wires the /api surface behind the access gateway and serves uploaded
//! assets statically.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::core::auth::handlers as auth_handlers;
use crate::core::auth::middleware::mw_gateway;
use crate::core::config::AppState;
use crate::core::pages::handlers as page_handlers;
use crate::core::uploads;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Auth routes
        .route("/api/login", post(auth_handlers::login))
        .route("/api/logout", post(auth_handlers::logout))
        .route("/api/auth", get(auth_handlers::auth_check))
        .route(
            "/api/user",
            get(auth_handlers::get_credential).post(auth_handlers::update_credential),
        )
        // Page routes
        .route(
            "/api/pages",
            get(page_handlers::list_pages).post(page_handlers::save_page),
        )
        .route("/api/pages/{id}", get(page_handlers::get_page))
        // Upload route
        .route("/api/upload", post(uploads::upload_asset))
        // Every /api request goes through the gateway; the allow-list
        // inside `authorize` admits the public routes.
        .route_layer(middleware::from_fn_with_state(state.clone(), mw_gateway));

    Router::new()
        .merge(api)
        .route("/health", get(health_check))
        .nest_service("/uploads", ServeDir::new(state.config.uploads_dir.clone()))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
