//! # Service Error Type
//!
//! Engine-level error taxonomy and its handler-facing shape.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in BeerService                            │
//! │                                                                         │
//! │  ValidationError (brewery-core) ───────────────┐                       │
//! │                                                ▼                       │
//! │  DbError::UniqueViolation ──────────────► ServiceError::Validation     │
//! │                                                                         │
//! │  DbError::{ConnectionFailed, QueryFailed,                              │
//! │            PoolExhausted, ...} ─────────► ServiceError::StoreUnavailable│
//! │                                                │                       │
//! │                                                ▼                       │
//! │                                   ApiError { code, message }           │
//! │                                                                         │
//! │  Not found is NOT an error: Option::None / DeleteOutcome::NotFound     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried. Store failures propagate as they are.

use serde::Serialize;
use thiserror::Error;

use brewery_core::ValidationError;
use brewery_db::DbError;

/// Errors returned by [`crate::BeerService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The payload was rejected. Never retried.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The record store failed.
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(#[source] DbError),
}

impl ServiceError {
    /// Machine-readable code for the handler layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Validation(_) => ErrorCode::ValidationError,
            ServiceError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }
}

/// Converts store errors.
///
/// A unique violation is the store telling us the payload was invalid
/// (duplicate UPC), so it becomes a validation error.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } => {
                ServiceError::Validation(ValidationError::Duplicate { field, value })
            }
            other => ServiceError::StoreUnavailable(other),
        }
    }
}

/// Result type for engine operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Handler-facing shape
// =============================================================================

/// Error codes for handler responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Store I/O failed (503)
    StoreUnavailable,
}

impl ErrorCode {
    /// HTTP status a handler should answer with.
    pub const fn http_status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::StoreUnavailable => 503,
        }
    }
}

/// Serializable error for the handler layer.
///
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "upc is required" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => ApiError {
                code: ErrorCode::ValidationError,
                message: e.to_string(),
            },
            ServiceError::StoreUnavailable(e) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %e, "Record store failure");
                ApiError {
                    code: ErrorCode::StoreUnavailable,
                    message: "Record store unavailable".to_string(),
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
