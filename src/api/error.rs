use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::json_response;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request rejected");
        json_response(
            status,
            ErrorResponse {
                error: self.to_string(),
                status: status.as_u16(),
            },
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ApiError::NotFound("calculator 'mortgage'".into());
        assert_eq!(err.to_string(), "Not found: calculator 'mortgage'");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::BadRequest("unknown risk level 'Extreme'".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_response_carries_status_and_no_store() {
        let response = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::CACHE_CONTROL)
                .map(|v| v.to_str().unwrap_or_default()),
            Some("no-store")
        );
    }

    #[test]
    fn cli_error_wraps_api_error_transparently() {
        let err = CliError::from(ApiError::BadRequest("bad sort".into()));
        assert_eq!(err.to_string(), "Bad request: bad sort");
    }
}
