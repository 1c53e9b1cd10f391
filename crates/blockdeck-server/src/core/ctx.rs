use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::error::{Error, Result};

/// Per-request auth context: the session token the gateway admitted.
#[derive(Clone, Debug)]
pub struct Ctx {
    token: String,
}

impl Ctx {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or_else(|| Error::Internal("auth context missing".to_string()))
    }
}
