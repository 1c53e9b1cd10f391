use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Everything a request can fail with. Responses carry a stable category
/// string only; storage and internal detail stays in the log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Block validation
    #[error("content must be an array of blocks")]
    NotSequence,
    #[error("invalid block kind '{kind}'")]
    InvalidBlockKind { kind: String },
    #[error("missing or invalid field '{field}'")]
    MissingField { field: &'static str },
    #[error("duplicate block id {id}")]
    DuplicateBlockId { id: i64 },

    // Auth
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,

    // Pages
    #[error("page {id} not found")]
    NotFound { id: i64 },

    // Generic
    #[error("{0}")]
    BadRequest(String),
    #[error("storage unavailable")]
    Persistence(#[from] sqlx::Error),
    #[error("internal error")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Error::NotSequence
            | Error::InvalidBlockKind { .. }
            | Error::MissingField { .. }
            | Error::DuplicateBlockId { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
            }
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, "not found".to_string()),
            Error::Persistence(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable".to_string())
            }
            Error::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Persistence(e) => error!("storage error: {e}"),
            Error::Internal(msg) => error!("internal error: {msg}"),
            _ => {}
        }

        let (status, message) = self.status_and_message();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
