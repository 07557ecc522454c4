//! Error types shared across the crate.
//!
//! Every error kind maps to a fixed HTTP status so the moderation and
//! validation contracts stay visible at the API boundary:
//! validation/input errors are 400, missing rows are 404, illegal state
//! transitions are 412 and a repeated idempotent-neutral transition is 304.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing request fields. Carries one entry per offending
    /// record so batch failures report everything at once.
    #[error("validation failed")]
    Validation(Vec<RecordErrors>),

    /// Malformed query input, e.g. a non-numeric token in a tag-id list.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Illegal state-machine transition attempt.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Repeat of an idempotent-neutral transition. Not a true error; it is
    /// carried through `Result` so handlers surface 304 uniformly.
    #[error("not modified")]
    NotModified,

    /// Outbound collaborator failure (search index, texting provider).
    /// Callers of the search index catch and log this, never propagate it.
    #[error("external service error: {0}")]
    ExternalService(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Validation failures for a single record within a (possibly batched) request.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecordErrors {
    /// Position of the record in the submitted batch.
    pub index: usize,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Precondition(_) => StatusCode::PRECONDITION_FAILED,
            Error::NotModified => StatusCode::NOT_MODIFIED,
            Error::ExternalService(_) => StatusCode::BAD_GATEWAY,
            Error::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 304 responses must not carry a body.
        if status == StatusCode::NOT_MODIFIED {
            return status.into_response();
        }

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = match &self {
            Error::Validation(records) => json!({ "services": records }),
            Error::Database(_) | Error::Internal(_) => {
                // Don't leak internals to clients.
                json!({ "error": "internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
