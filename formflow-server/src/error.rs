//! Mapping of [`ApiError`] onto HTTP responses.
//!
//! Body shape is always `{"code": "...", "message": "..."}`; clients match
//! on `code`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formflow_api::ApiError;

/// Handler error wrapper so `ApiError` stays free of HTTP types.
#[derive(Debug)]
pub struct HttpError(pub ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        HttpError(err)
    }
}

pub fn status_code(err: &ApiError) -> StatusCode {
    match err {
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::Forbidden(_) | ApiError::NotApproved(_) => StatusCode::FORBIDDEN,
        ApiError::InvalidState(_) | ApiError::InvalidInput(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
        ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        ApiError::DependencyFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = status_code(&self.0);
        // Detail of dependency failures was logged where it happened
        let message = match &self.0 {
            ApiError::DependencyFailure(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        let body = serde_json::json!({
            "code": self.0.error_code(),
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(status_code(&ApiError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_code(&ApiError::Forbidden("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(status_code(&ApiError::NotApproved("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(status_code(&ApiError::InvalidState("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_code(&ApiError::Conflict("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_code(&ApiError::Unauthenticated("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_code(&ApiError::DependencyFailure("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_dependency_failure_body_is_generic() {
        let response = HttpError(ApiError::DependencyFailure("list users failed".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "DEPENDENCY_FAILURE");
        assert_eq!(body["message"], "internal server error");
    }
}
