//! Error types for the Orquesta server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes surfaced in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchResource = 4,
    BadValue = 5,
    Duplicate = 6,
    InstrumentNotAvailable = 7,
    ResourceInUse = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Instrument not available: {0}")]
    InstrumentUnavailable(String),

    #[error("Resource in use: {0}")]
    ResourceInUse(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchResource, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::InstrumentUnavailable(msg) => {
                (StatusCode::CONFLICT, ErrorCode::InstrumentNotAvailable, msg.clone())
            }
            AppError::ResourceInUse(msg) => {
                (StatusCode::CONFLICT, ErrorCode::ResourceInUse, msg.clone())
            }
            AppError::Database(e) => match constraint_violation(e) {
                Some((code, msg)) => (StatusCode::CONFLICT, code, msg),
                None => {
                    tracing::error!("Database error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::DbFailure,
                        "Database error".to_string(),
                    )
                }
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Map unique (23505) and foreign key (23503) violations to conflict codes
/// instead of masking them as server errors.
fn constraint_violation(e: &sqlx::Error) -> Option<(ErrorCode, String)> {
    let db_err = match e {
        sqlx::Error::Database(db_err) => db_err,
        _ => return None,
    };
    match db_err.code().as_deref() {
        Some("23505") => Some((ErrorCode::Duplicate, "Duplicate value".to_string())),
        Some("23503") => Some((
            ErrorCode::ResourceInUse,
            "Referenced by existing records".to_string(),
        )),
        _ => None,
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_kinds_are_distinguishable() {
        let unavailable = AppError::InstrumentUnavailable("busy".into()).into_response();
        let duplicate = AppError::Conflict("dup".into()).into_response();
        let in_use = AppError::ResourceInUse("referenced".into()).into_response();

        assert_eq!(unavailable.status(), StatusCode::CONFLICT);
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
        assert_eq!(in_use.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        let missing = AppError::Authentication("no token".into()).into_response();
        let invalid = AppError::Authorization("bad token".into()).into_response();

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let response = AppError::Internal("secret pool state".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
