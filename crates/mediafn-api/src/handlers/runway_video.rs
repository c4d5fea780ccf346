//! `generateRunwayVideo` function.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::error;

use mediafn_models::{GenerateRunwayVideoRequest, GenerateRunwayVideoResponse};

use crate::error::{ApiError, ApiResult};
use crate::services::{with_deadline, VideoGenerationService};
use crate::state::AppState;

/// Generate a video from `imageUrl` and an optional `promptText`.
pub async fn generate_runway_video(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRunwayVideoRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateRunwayVideoResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let image_url = request
        .image_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("imageUrl is required"))?;

    let response = async {
        let service = VideoGenerationService::new(state.runway()?);
        with_deadline(
            state.config.runway_video_timeout,
            service.generate(image_url, request.prompt_text.as_deref()),
        )
        .await
    }
    .await
    .inspect_err(|e| error!(error = %e, "Error in generateRunwayVideo"))?;

    Ok(Json(response))
}
