use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::contacts::store::StoreError;

/// Request-level failure taxonomy. Each variant maps to exactly one status
/// code; the body is the JSON envelope `{"error", "message", "code"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("resource already exists")]
    Conflict,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::NotFound => ("not_found", "NOT_FOUND"),
            Self::Conflict => ("conflict", "CONFLICT"),
            Self::Unauthorized(_) => ("unauthorized", "UNAUTHORIZED"),
            Self::Validation(_) => ("bad_request", "BAD_REQUEST"),
            Self::Internal(_) => ("internal_error", "INTERNAL_ERROR"),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Self::NotFound,
            StoreError::Conflict => Self::Conflict,
            StoreError::Pool(e) => Self::Internal(format!("DB error: {e}")),
            StoreError::Database(e) => Self::Internal(format!("Query error: {e}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error, code) = self.labels();
        let status = self.status();
        let body = serde_json::json!({
            "error": error,
            "message": self.to_string(),
            "code": code,
        });

        if matches!(self, Self::Unauthorized(_)) {
            return (
                status,
                [
                    ("Content-Type", "application/json"),
                    ("WWW-Authenticate", "Bearer"),
                ],
                Json(body),
            )
                .into_response();
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_api_taxonomy() {
        assert!(matches!(
            ApiError::from(StoreError::NotFound),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(StoreError::Conflict),
            ApiError::Conflict
        ));
    }

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Unauthorized("missing token".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Validation("bad upload".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
