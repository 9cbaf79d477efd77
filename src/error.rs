//! Domain error type shared by repositories, services and handlers.
//!
//! Every variant maps to one HTTP response shape: `{ "error": ..., "code": ... }`.
//! All errors are request-local; nothing here is retried or fatal.

use axum::{http::StatusCode, response::IntoResponse, Json};
use sea_orm::DbErr;

use crate::models::common::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed input: negative quantity, empty name, unavailable item, ...
    Validation(String),
    /// Referenced entity id does not exist
    NotFound(String),
    /// (restaurant, number) already taken
    DuplicateTable { restaurant_id: i32, number: String },
    /// Deletion blocked because order history still references the row
    ProtectedReference(String),
    /// Out-of-sequence order status change
    InvalidTransition { from: String, to: String },
    /// Anything the storage layer refused
    Database(DbErr),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::DuplicateTable { restaurant_id, number } => write!(
                f,
                "Table {} already exists for restaurant {}",
                number, restaurant_id
            ),
            ApiError::ProtectedReference(msg) => write!(f, "{}", msg),
            ApiError::InvalidTransition { from, to } => {
                write!(f, "Invalid status transition: {} -> {}", from, to)
            }
            ApiError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        ApiError::Database(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateTable { .. } => StatusCode::CONFLICT,
            ApiError::ProtectedReference(_) => StatusCode::CONFLICT,
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::DuplicateTable { .. } => "DUPLICATE_TABLE",
            ApiError::ProtectedReference(_) => "PROTECTED_REFERENCE",
            ApiError::InvalidTransition { .. } => "INVALID_TRANSITION",
            ApiError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Database(e) = &self {
            tracing::error!(error = %e, "request failed on database error");
        }
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err = ApiError::Validation("quantity must be >= 1".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::NotFound("Order 7 not found".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_conflict_family_maps_to_409() {
        let dup = ApiError::DuplicateTable {
            restaurant_id: 1,
            number: "12".to_string(),
        };
        let protected = ApiError::ProtectedReference("referenced".to_string());
        let transition = ApiError::InvalidTransition {
            from: "COMPLETED".to_string(),
            to: "PENDING".to_string(),
        };
        assert_eq!(dup.status(), StatusCode::CONFLICT);
        assert_eq!(protected.status(), StatusCode::CONFLICT);
        assert_eq!(transition.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_duplicate_table_message() {
        let err = ApiError::DuplicateTable {
            restaurant_id: 3,
            number: "patio-1".to_string(),
        };
        assert_eq!(err.to_string(), "Table patio-1 already exists for restaurant 3");
    }
}
