use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use aroma_common::ai::AiError;
use aroma_common::catalog::CatalogError;

use crate::model::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Query shorter than the minimum after trimming. Benign: surfaced as a
    /// validation failure, never logged as exceptional.
    #[error("query must have at least 3 characters")]
    InvalidQuery,

    /// Upstream catalog fetch failed. Terminal for the request; no retry, no
    /// partial results.
    #[error("catalog fetch failed: {0}")]
    DataUnavailable(#[from] CatalogError),

    /// The AI completion behind the suggestion endpoint failed.
    #[error("suggestion generation failed: {0}")]
    SuggestionFailed(#[from] AiError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidQuery => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::DataUnavailable(e) => {
                error!(error = %e, "oil catalog fetch failed");
                // Generic message: internal details stay out of responses.
                (StatusCode::INTERNAL_SERVER_ERROR, "search failed".to_string())
            }
            ApiError::SuggestionFailed(e) => {
                error!(error = %e, "suggestion generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "suggestion failed".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_query_maps_to_bad_request() {
        let response = ApiError::InvalidQuery.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn data_unavailable_maps_to_internal_error() {
        let err = ApiError::DataUnavailable(CatalogError::Config("boom".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
