//! Typed API error for HTTP handlers.
//!
//! Converts service errors and extractor rejections into JSON responses of
//! the form `{"success": false, "error": "...", "details"?: [...]}`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use habitlog_core::FieldIssue;
use habitlog_service::ServiceError;
use habitlog_storage::StorageError;
use serde::Serialize;

/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with optional per-field details.
    BadRequest { message: String, details: Vec<FieldIssue> },
    /// 401, no credential presented.
    Unauthorized(String),
    /// 403, credential presented but rejected.
    Forbidden(String),
    NotFound(String),
    /// 500, details logged, not exposed.
    Internal(anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "no_details")]
    details: &'a [FieldIssue],
}

fn no_details(details: &&[FieldIssue]) -> bool {
    details.is_empty()
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into(), details: Vec::new() }
    }

    /// 400 "Validation failed" carrying per-field issues.
    pub fn validation(details: Vec<FieldIssue>) -> Self {
        Self::BadRequest { message: "Validation failed".to_owned(), details }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            Self::BadRequest { message, details } => (StatusCode::BAD_REQUEST, message, details),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, Vec::new()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, Vec::new()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned(), Vec::new())
            },
        };
        let body = ErrorBody { success: false, error: &message, details: &details };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(v) => Self::validation(v.issues),
            ServiceError::Unauthorized => Self::Unauthorized("No token provided".to_owned()),
            ServiceError::InvalidToken(e) => {
                tracing::debug!(error = %e, "rejected token");
                Self::Forbidden("Invalid or expired token".to_owned())
            },
            ServiceError::Storage(StorageError::NotFound { entity, .. }) => {
                Self::NotFound(format!("{} not found.", capitalize(entity)))
            },
            other => Self::Internal(other.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => {
                tracing::debug!(error = %e.body_text(), "unparseable JSON body");
                Self::bad_request("Malformed JSON body")
            },
            other => Self::bad_request(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
