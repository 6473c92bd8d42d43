//! Centralized error handling.
//!
//! Every failure a handler can produce is an [`AppError`]. The
//! `IntoResponse` impl wraps it in the `{status: false, data: {...}}`
//! envelope and hides storage/internal details from the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// State-conflict conditions, each with its own machine-readable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    SessionAlreadyOpen,
    SessionNotOpen,
    OrderAlreadyVoided,
    OrderAlreadyRecovered,
    InviteQuota,
}

impl ConflictKind {
    fn code(self) -> &'static str {
        match self {
            ConflictKind::SessionAlreadyOpen => "SESSION_ALREADY_OPEN",
            ConflictKind::SessionNotOpen => "SESSION_NOT_OPEN",
            ConflictKind::OrderAlreadyVoided => "ORDER_ALREADY_VOIDED",
            ConflictKind::OrderAlreadyRecovered => "ORDER_ALREADY_RECOVERED",
            ConflictKind::InviteQuota => "INVITE_QUOTA",
        }
    }

    fn message(self) -> &'static str {
        match self {
            ConflictKind::SessionAlreadyOpen => "A work session is already open for this employee",
            ConflictKind::SessionNotOpen => "No open work session for this employee",
            ConflictKind::OrderAlreadyVoided => "Order is already voided",
            ConflictKind::OrderAlreadyRecovered => "Order is already recovered",
            ConflictKind::InviteQuota => "Too many outstanding invitations",
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    #[error("{}", .0.message())]
    StateConflict(ConflictKind),

    #[error("{0} is in use")]
    InUse(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Invitation code is invalid or expired")]
    InvalidInviteCode,

    // External service errors
    #[error("Database error")]
    Database(#[source] DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Foreign-key violations become `InUse`, unique violations `Conflict`,
/// everything else stays opaque.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!(%detail, "unique constraint violation");
                AppError::Conflict("Record".to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::debug!(%detail, "foreign key violation");
                AppError::InUse("Record".to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

/// Error payload placed in the envelope's `data` field
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Failure envelope, mirrors `types::ApiResponse`
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    status: bool,
    data: ErrorBody,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::StateConflict(kind) => kind.code(),
            AppError::InUse(_) => "IN_USE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InvalidInviteCode => "INVALID_INVITE_CODE",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::StateConflict(_) | AppError::InUse(_) => {
                StatusCode::CONFLICT
            }
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::InvalidInviteCode => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),

            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Unknown error".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Unknown error".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorEnvelope {
            status: false,
            data: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn in_use(entity: impl Into<String>) -> Self {
        AppError::InUse(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
