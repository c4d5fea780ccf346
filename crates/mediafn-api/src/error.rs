//! API error types.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use mediafn_media::MediaError;
use mediafn_models::ErrorBody;
use mediafn_runway::RunwayError;
use mediafn_twelvelabs::TwelveLabsError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Function timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    TwelveLabs(#[from] TwelveLabsError),

    #[error(transparent)]
    Runway(#[from] RunwayError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Media(_)
            | ApiError::TwelveLabs(_)
            | ApiError::Runway(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("imageUrl is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Timeout(Duration::from_secs(300)).status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            ApiError::from(RunwayError::GenerationFailed { reason: None }).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_vendor_errors_keep_their_message() {
        let err = ApiError::from(RunwayError::TimedOut { polls: 12 });
        assert_eq!(err.to_string(), "Timed out waiting for generation");

        let err = ApiError::Timeout(Duration::from_secs(540));
        assert_eq!(err.to_string(), "Function timed out after 540s");

        let err = ApiError::from(TwelveLabsError::MissingApiKey);
        assert_eq!(err.to_string(), "TWELVE_LABS_KEY is not configured");
    }
}
