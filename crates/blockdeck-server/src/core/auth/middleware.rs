use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use headers::{Cookie, HeaderMapExt};
use tracing::debug;

use crate::core::auth::gateway::{authorize, Access};
use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::{Error, Result};

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "session";

/// Gateway middleware applied to the whole /api surface.
pub async fn mw_gateway(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let path = req.uri().path().to_string();
    let token = extract_token(req.headers());
    debug!("GATEWAY: {path}");

    match authorize(&path, token.as_deref(), &state.auth) {
        Access::Admit => {
            if let Some(token) = token {
                req.extensions_mut().insert(Ctx::new(token));
            }
            Ok(next.run(req).await)
        }
        Access::Reject => Err(Error::Unauthorized),
    }
}

/// Pull the opaque session token out of the bearer header or the session
/// cookie. The bearer form is the equivalent transport for non-browser
/// callers.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    if bearer.is_some() {
        return bearer;
    }

    headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(SESSION_COOKIE).map(str::to_string))
}
