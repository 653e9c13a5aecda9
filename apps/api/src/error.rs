//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kasir                                  │
//! │                                                                         │
//! │  Handler → Result<T, ApiError>                                          │
//! │     │                                                                   │
//! │     ├── DbError::NotFound ─────────────────────────► 404 {error}        │
//! │     ├── DbError::Domain(InsufficientStock) ────────► 400 {error,        │
//! │     │                                                  product_id,      │
//! │     │                                                  requested,       │
//! │     │                                                  available}       │
//! │     ├── DbError::Domain(other) ────────────────────► 400 {error}        │
//! │     ├── Json / Path / Query rejection ─────────────► 400 {error}        │
//! │     └── persistence failure ── error!(..) logged ──► 500 {error}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Driver messages never reach the client; they are logged and replaced
//! with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kasir_core::CoreError;
use kasir_db::DbError;
use serde::Serialize;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned from a handler.
///
/// ## Serialization
/// ```json
/// { "error": "Product not found: 42" }
/// ```
/// Stock errors add the fields a client needs to render the shortfall:
/// ```json
/// {
///   "error": "Insufficient stock for product 7: requested 3, available 2",
///   "product_id": 7,
///   "requested": 3,
///   "available": 2
/// }
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,

    #[serde(flatten)]
    pub shortfall: Option<StockShortfall>,
}

/// Structured part of an insufficient-stock response.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StockShortfall {
    pub product_id: i64,
    pub requested: i64,
    pub available: i64,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            body: ErrorBody {
                error: message.into(),
                shortfall: None,
            },
        }
    }

    /// Creates a 400 error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, format!("{} not found: {}", resource, id))
    }

    /// Creates a 500 error with a generic message.
    pub fn internal() -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Converts domain errors to API errors. All of them are client errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                product_id,
                requested,
                available,
            } => {
                let mut api = ApiError::bad_request(err.to_string());
                api.body.shortfall = Some(StockShortfall {
                    product_id,
                    requested,
                    available,
                });
                api
            }
            CoreError::InvalidDateFormat { .. } => {
                ApiError::bad_request("Invalid date format, use YYYY-MM-DD")
            }
            CoreError::ProductNotFound { .. }
            | CoreError::AmountOverflow { .. }
            | CoreError::Validation(_) => ApiError::bad_request(err.to_string()),
        }
    }
}

/// Converts database errors to API errors.
///
/// [`DbError::is_persistence_failure`] decides between a 5xx with a
/// generic message and a 4xx carrying the error itself.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if err.is_persistence_failure() {
            // Log the actual error but return a generic message
            tracing::error!(error = %err, "Database operation failed");
            return match err {
                DbError::PoolExhausted => ApiError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable",
                ),
                _ => ApiError::internal(),
            };
        }

        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::Domain(core) => core.into(),
            // every other variant is a persistence failure
            _ => ApiError::internal(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected path parameter");
        ApiError::bad_request("Invalid ID")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}
